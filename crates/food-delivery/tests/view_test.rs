use food_delivery::error::FoodError;
use food_delivery::lifecycle::{DeliverySystem, Settings};
use food_delivery::model::{CustomerId, OrderCreate, OrderId, Payment};
use food_delivery::seed::Seed;
use food_delivery::views::{ViewDefinition, ViewRows, CUSTOMER_ORDERS, PAYMENT_ORDER_CUSTOMER_DETAILS};

async fn seeded_system() -> DeliverySystem {
    let system = DeliverySystem::new(&Settings::default());
    Seed::standard()
        .unwrap()
        .apply(system.store())
        .await
        .unwrap();
    system
}

#[tokio::test]
async fn test_customer_orders_view_tracks_tables() {
    let system = seeded_system().await;
    let views = &system.view_client;

    views
        .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await
        .unwrap();
    let rows = views.customer_orders(CUSTOMER_ORDERS).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].customer_id, CustomerId(101));
    assert_eq!(rows[0].customer_name, "Aarav Sharma");
    assert_eq!(rows[0].order_id, OrderId(1001));

    system
        .order_client
        .place_order(OrderCreate::new(1006, 106, 1, 250.0))
        .await
        .unwrap();
    let rows = views.customer_orders(CUSTOMER_ORDERS).await.unwrap();
    assert_eq!(
        rows.iter().map(|r| r.order_id).collect::<Vec<_>>(),
        vec![OrderId(1001), OrderId(1006)]
    );
    assert_eq!(rows[1].total, 250.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_view_twice_fails_but_replace_succeeds() {
    let system = seeded_system().await;
    let views = &system.view_client;

    views
        .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await
        .unwrap();
    assert_eq!(
        views
            .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
            .await,
        Err(FoodError::ViewAlreadyExists(CUSTOMER_ORDERS.to_string()))
    );
    views
        .create_or_replace_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await
        .unwrap();

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_payment_details_join_all_three_tables() {
    let system = seeded_system().await;
    let views = &system.view_client;
    system
        .order_client
        .place_order(OrderCreate::new(1006, 106, 1, 250.0).with_address("3 Hill Road, Mumbai"))
        .await
        .unwrap();
    system
        .payment_client
        .record_payment(Payment::new(4, 1006, 250.0, "upi", "completed"))
        .await
        .unwrap();

    views
        .create_or_replace_view(
            PAYMENT_ORDER_CUSTOMER_DETAILS,
            ViewDefinition::PaymentOrderCustomerDetails,
        )
        .await
        .unwrap();
    let rows = views
        .payment_details(PAYMENT_ORDER_CUSTOMER_DETAILS)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let row = &rows[1];
    assert_eq!(row.order_id, OrderId(1006));
    assert_eq!(row.customer_id, CustomerId(106));
    assert_eq!(row.customer_name, "Ishita Rao");
    assert_eq!(row.age, 27);
    assert_eq!(row.address.as_deref(), Some("3 Hill Road, Mumbai"));
    assert_eq!(row.mode, "upi");
    assert_eq!(row.status, "completed");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_drop_and_recreate_loses_nothing() {
    let system = seeded_system().await;
    let views = &system.view_client;

    views
        .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await
        .unwrap();
    let before = views.select(CUSTOMER_ORDERS).await.unwrap();

    views.drop_view(CUSTOMER_ORDERS).await.unwrap();
    assert_eq!(
        views.select(CUSTOMER_ORDERS).await,
        Err(FoodError::ViewNotFound(CUSTOMER_ORDERS.to_string()))
    );
    assert_eq!(
        views.drop_view(CUSTOMER_ORDERS).await,
        Err(FoodError::ViewNotFound(CUSTOMER_ORDERS.to_string()))
    );
    views.drop_view_if_exists(CUSTOMER_ORDERS).await.unwrap();

    views
        .create_view(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
        .await
        .unwrap();
    assert_eq!(views.select(CUSTOMER_ORDERS).await.unwrap(), before);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_view_ddl_rolls_back_with_transaction() {
    let system = seeded_system().await;
    let session = system.session().await.unwrap();

    session.begin().await.unwrap();
    session
        .execute(food_delivery::store::Statement::CreateView {
            name: "Scratch".to_string(),
            definition: ViewDefinition::CustomerOrders,
        })
        .await
        .unwrap();
    session.rollback().await.unwrap();
    drop(session);

    assert_eq!(
        system.view_client.select("Scratch").await,
        Err(FoodError::ViewNotFound("Scratch".to_string()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wrong_projection_is_unexpected() {
    let system = seeded_system().await;
    let views = &system.view_client;

    views
        .create_view("Orders", ViewDefinition::CustomerOrders)
        .await
        .unwrap();
    assert!(matches!(
        views.select("Orders").await,
        Ok(ViewRows::CustomerOrders(_))
    ));
    assert!(matches!(
        views.payment_details("Orders").await,
        Err(FoodError::UnexpectedResult(_))
    ));

    system.shutdown().await.unwrap();
}
