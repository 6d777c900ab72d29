//! # Food Delivery Demo
//!
//! Seeds the store, replays the three transaction scripts (commit, rollback,
//! savepoint), fires each order trigger once, and prints both views.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p food-delivery
//! FOOD_DELIVERY__STORE__ENFORCE_REFERENCES=false cargo run -p food-delivery
//! ```

use food_delivery::error::FoodError;
use food_delivery::lifecycle::{DeliverySystem, Settings};
use food_delivery::model::{CustomerId, OrderCreate, OrderId, Payment};
use food_delivery::seed::Seed;
use food_delivery::store::Statement;
use food_delivery::views::{ViewDefinition, CUSTOMER_ORDERS, PAYMENT_ORDER_CUSTOMER_DETAILS};
use tracing::{error, info, Instrument};
use txn_actor::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    setup_tracing(&settings.log.filter);

    info!(?settings, "Starting food delivery store");
    let system = DeliverySystem::new(&settings);

    Seed::standard()?.apply(system.store()).await?;

    replay_transactions(&system)
        .instrument(tracing::info_span!("transactions"))
        .await?;
    fire_triggers(&system)
        .instrument(tracing::info_span!("triggers"))
        .await?;
    show_views(&system)
        .instrument(tracing::info_span!("views"))
        .await?;

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

async fn replay_transactions(system: &DeliverySystem) -> Result<(), FoodError> {
    let session = system.session().await?;

    // Commit: order 1006 and its payment persist.
    session.begin().await?;
    session
        .execute(Statement::InsertOrder(OrderCreate::new(1006, 106, 1, 250.0)))
        .await?;
    session
        .execute(Statement::InsertPayment(Payment::new(
            4,
            1006,
            250.0,
            "upi",
            "completed",
        )))
        .await?;
    session.commit().await?;
    info!(
        found = system.order_client.get_order(OrderId(1006)).await?.is_some(),
        "Committed order 1006"
    );

    // Rollback: order 1007 is discarded.
    session.begin().await?;
    session
        .execute(Statement::InsertOrder(OrderCreate::new(1007, 107, 2, 300.0)))
        .await?;
    session.rollback().await?;
    info!(
        found = system.order_client.get_order(OrderId(1007)).await?.is_some(),
        "Rolled back order 1007"
    );

    // Savepoint: order 1008 survives, payment 5 does not.
    session.begin().await?;
    session
        .execute(Statement::InsertOrder(OrderCreate::new(1008, 108, 3, 350.0)))
        .await?;
    session.savepoint("order_insert").await?;
    session
        .execute(Statement::InsertPayment(Payment::new(
            5,
            1008,
            350.0,
            "credit",
            "in process",
        )))
        .await?;
    session.rollback_to("order_insert").await?;
    session.commit().await?;
    info!(
        order = system.order_client.get_order(OrderId(1008)).await?.is_some(),
        payment = system.payment_client.payment_for_order(OrderId(1008)).await?.is_some(),
        "Rolled back to savepoint order_insert"
    );

    Ok(())
}

async fn fire_triggers(system: &DeliverySystem) -> Result<(), FoodError> {
    // Completing order 1001 completes its payment.
    system.order_client.complete_order(OrderId(1001)).await?;
    if let Some(payment) = system.payment_client.payment_for_order(OrderId(1001)).await? {
        info!(payment_id = %payment.id, status = %payment.status, "Order 1001 completed");
    }

    // Agent 1 already carries order 1006.
    match system
        .order_client
        .place_order(OrderCreate::new(1009, 103, 1, 120.0))
        .await
    {
        Ok(order_id) => info!(%order_id, "Order placed"),
        Err(e) => error!(error = %e, "Order 1009 rejected"),
    }

    // A new order moves the customer to its address.
    system
        .order_client
        .place_order(
            OrderCreate::new(1010, 105, 5, 180.0).with_address("7 Residency Road, Pune"),
        )
        .await?;
    if let Some(customer) = system.customer_client.get_customer(CustomerId(105)).await? {
        info!(customer_id = %customer.id, address = ?customer.address, "Customer address synced");
    }

    Ok(())
}

async fn show_views(system: &DeliverySystem) -> Result<(), FoodError> {
    let views = &system.view_client;

    views
        .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await?;
    for row in views.customer_orders(CUSTOMER_ORDERS).await? {
        info!(
            customer_id = %row.customer_id,
            customer_name = %row.customer_name,
            order_id = %row.order_id,
            total = row.total,
            "CustomerOrders"
        );
    }

    views
        .create_or_replace_view(
            PAYMENT_ORDER_CUSTOMER_DETAILS,
            ViewDefinition::PaymentOrderCustomerDetails,
        )
        .await?;
    for row in views.payment_details(PAYMENT_ORDER_CUSTOMER_DETAILS).await? {
        info!(
            payment_id = %row.payment_id,
            order_id = %row.order_id,
            customer_name = %row.customer_name,
            address = ?row.address,
            amount = row.amount,
            mode = %row.mode,
            status = %row.status,
            "PaymentOrderCustomerDetails"
        );
    }

    views
        .drop_view_if_exists(PAYMENT_ORDER_CUSTOMER_DETAILS)
        .await?;
    views
        .drop_view_if_exists(PAYMENT_ORDER_CUSTOMER_DETAILS)
        .await?;
    info!("Dropped PaymentOrderCustomerDetails");

    Ok(())
}
