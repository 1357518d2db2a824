use super::*;
use shared::order::{PaymentMethod, PaymentStatus};


fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn create_test_manager() -> OrderManager {
    init_tracing();
    OrderManager::new(EngineConfig::default())
}

fn create_test_stock_manager() -> StockManager {
    init_tracing();
    StockManager::new()
}

fn simple_item(name: &str, quantity: i32, unit_price: f64) -> OrderItemInput {
    OrderItemInput {
        product_id: None,
        name: name.to_string(),
        quantity,
        unit_price,
        note: None,
    }
}

fn draft_with_items(items: Vec<OrderItemInput>) -> OrderDraft {
    OrderDraft {
        customer_name: "Maria Silva".to_string(),
        customer_id: None,
        items,
        notes: None,
    }
}

/// Order with total 130.00 (100 business cards at 0.30 plus one
/// banner at 100.00)
fn create_order_130(manager: &OrderManager) -> String {
    let order = manager
        .create_order(draft_with_items(vec![
            simple_item("Cartão de visita", 100, 0.30),
            simple_item("Banner 80x120", 1, 100.00),
        ]))
        .unwrap();
    order.order_id
}

fn payment(method: PaymentMethod, amount: f64) -> PaymentInput {
    PaymentInput {
        method,
        amount,
        installment_seq: None,
        note: None,
    }
}

fn stocked_product(manager: &StockManager, id: &str, stock: i32) -> String {
    let mut product = Product::new(id.to_string(), format!("Produto {}", id), 10.0);
    product.stock = stock;
    manager.add_product(product).unwrap();
    id.to_string()
}
