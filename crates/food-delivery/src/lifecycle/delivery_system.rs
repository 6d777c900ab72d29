use crate::clients::{CustomerClient, DeliveryAgentClient, OrderClient, PaymentClient, ViewClient};
use crate::error::FoodError;
use crate::lifecycle::Settings;
use crate::store::FoodDb;
use tokio::task::JoinHandle;
use tracing::{error, info};
use txn_actor::{DatabaseActor, DatabaseClient, Session};

/// The running food-delivery store.
///
/// Owns the actor task and exposes one client per table. All clients share
/// the same actor, so a write through one is visible to the others at once.
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new(&Settings::default());
///
/// system.customer_client.register_customer(Customer::new(101, "John Doe", 30)).await?;
/// let session = system.session().await?;
/// session.begin().await?;
/// // ...
/// session.commit().await?;
/// drop(session);
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    pub customer_client: CustomerClient,
    pub agent_client: DeliveryAgentClient,
    pub order_client: OrderClient,
    pub payment_client: PaymentClient,
    pub view_client: ViewClient,

    store: DatabaseClient<FoodDb>,
    handle: JoinHandle<()>,
}

impl DeliverySystem {
    /// Spawns the store actor with the standard triggers.
    pub fn new(settings: &Settings) -> Self {
        let db = FoodDb::default().enforce_references(settings.store.enforce_references);
        Self::with_db(db, settings.store.channel_buffer)
    }

    /// Spawns the store actor around a prepared database, e.g. one with extra triggers.
    pub fn with_db(db: FoodDb, channel_buffer: usize) -> Self {
        let (actor, store) = DatabaseActor::new(channel_buffer.max(1), db);
        let handle = tokio::spawn(actor.run());
        info!(channel_buffer, "Delivery system started");

        Self {
            customer_client: CustomerClient::new(store.clone()),
            agent_client: DeliveryAgentClient::new(store.clone()),
            order_client: OrderClient::new(store.clone()),
            payment_client: PaymentClient::new(store.clone()),
            view_client: ViewClient::new(store.clone()),
            store,
            handle,
        }
    }

    /// Opens a session for an explicit unit of work.
    pub async fn session(&self) -> Result<Session<FoodDb>, FoodError> {
        Ok(self.store.session().await?)
    }

    /// The untyped client, for running raw statements.
    pub fn store(&self) -> &DatabaseClient<FoodDb> {
        &self.store
    }

    /// Drops every client and waits for the actor to stop.
    ///
    /// Any transaction still open at that point is rolled back.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down delivery system...");

        drop(self.customer_client);
        drop(self.agent_client);
        drop(self.order_client);
        drop(self.payment_client);
        drop(self.view_client);
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store actor failed: {:?}", e);
            return Err(format!("Store actor failed: {:?}", e));
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}
