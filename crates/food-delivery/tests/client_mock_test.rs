use food_delivery::clients::{CustomerClient, OrderClient, ViewClient};
use food_delivery::error::FoodError;
use food_delivery::model::{Customer, CustomerId, OrderCreate, OrderId};
use food_delivery::store::{FoodDb, QueryResult};
use food_delivery::views::{ViewRows, CUSTOMER_ORDERS};
use txn_actor::mock::MockClient;
use txn_actor::TxError;

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct Unrelated;

#[tokio::test]
async fn test_order_client_unpacks_results() {
    let mut mock = MockClient::<FoodDb>::new();
    mock.expect_execute().return_ok(1);
    mock.expect_query().return_ok(QueryResult::Order(None));
    mock.expect_query().return_ok(QueryResult::Orders(Vec::new()));

    let orders = OrderClient::new(mock.client());
    assert_eq!(
        orders.place_order(OrderCreate::new(1, 101, 1, 9.5)).await,
        Ok(OrderId(1))
    );
    assert_eq!(orders.get_order(OrderId(1)).await, Ok(None));
    assert_eq!(orders.list_orders().await, Ok(Vec::new()));

    mock.verify();
}

#[tokio::test]
async fn test_domain_errors_are_recovered_from_tx_errors() {
    let mut mock = MockClient::<FoodDb>::new();
    mock.expect_execute()
        .return_err(TxError::Statement(Box::new(FoodError::agent_unavailable())));
    mock.expect_execute().return_err(TxError::Statement(Box::new(Unrelated)));
    mock.expect_execute().return_err(TxError::ActorClosed);

    let orders = OrderClient::new(mock.client());
    let place = || orders.place_order(OrderCreate::new(2, 101, 1, 9.5));

    assert_eq!(place().await, Err(FoodError::agent_unavailable()));
    assert_eq!(
        place().await,
        Err(FoodError::Store("Statement failed: disk on fire".to_string()))
    );
    assert_eq!(
        place().await,
        Err(FoodError::Store("Database actor closed".to_string()))
    );

    mock.verify();
}

#[tokio::test]
async fn test_mismatched_result_is_unexpected() {
    let mut mock = MockClient::<FoodDb>::new();
    mock.expect_query().return_ok(QueryResult::Orders(Vec::new()));
    mock.expect_query()
        .return_ok(QueryResult::View(ViewRows::PaymentDetails(Vec::new())));

    let customers = CustomerClient::new(mock.client());
    assert!(matches!(
        customers.get_customer(CustomerId(101)).await,
        Err(FoodError::UnexpectedResult(_))
    ));

    let views = ViewClient::new(mock.client());
    assert!(matches!(
        views.customer_orders(CUSTOMER_ORDERS).await,
        Err(FoodError::UnexpectedResult(_))
    ));

    mock.verify();
}

#[tokio::test]
async fn test_register_customer_returns_its_id() {
    let mut mock = MockClient::<FoodDb>::new();
    mock.expect_execute().return_ok(1);

    let customers = CustomerClient::new(mock.client());
    let id = customers
        .register_customer(Customer::new(109, "Neha Kapoor", 29).with_address("Goa"))
        .await
        .unwrap();
    assert_eq!(id, CustomerId(109));

    mock.verify();
}
