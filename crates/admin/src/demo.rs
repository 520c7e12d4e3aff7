//! Demo data set: two shops, four clients, and the prescription history
//! that makes one of them a visitor.
//!
//! | client | home shop       | prescriptions at        |
//! |--------|-----------------|-------------------------|
//! | Alice  | Ótica Avenida   | Ótica Avenida           |
//! | Bob    | Ótica Avenida   |                         |
//! | Carol  | Ótica Boa Vista | Ótica Avenida, Boa Vista|
//! | Dave   | (particular)    | (particular)            |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use optica_core::{ClientId, ClientName, ClientNameError, ShopId};

use crate::db::{ClientRepository, PrescriptionRepository, RepositoryError, ShopRepository};
use crate::models::{
    CreateClientInput, CreatePrescriptionInput, CreateShopInput, EyeMeasurements, Payer,
    ServiceType,
};
use crate::store::MemoryStore;

const SHOPS: [&str; 2] = ["Ótica Avenida", "Ótica Boa Vista"];

/// (name, index into `SHOPS`)
const CLIENTS: [(&str, Option<usize>); 4] = [
    ("Alice", Some(0)),
    ("Bob", Some(0)),
    ("Carol", Some(1)),
    ("Dave", None),
];

struct DemoPrescription {
    client: usize,
    shop: Option<usize>,
    date: (i32, u32, u32),
    service_type: ServiceType,
    price: i64,
    payer: Payer,
    spherical: (&'static str, &'static str),
}

const PRESCRIPTIONS: [DemoPrescription; 4] = [
    DemoPrescription {
        client: 0,
        shop: Some(0),
        date: (2026, 1, 12),
        service_type: ServiceType::ExameVista,
        price: 120,
        payer: Payer::PagoCliente,
        spherical: ("-1.25", "-1.00"),
    },
    DemoPrescription {
        client: 2,
        shop: Some(0),
        date: (2026, 2, 10),
        service_type: ServiceType::ConsultaOculos,
        price: 90,
        payer: Payer::PagoOtica,
        spherical: ("+0.75", "+0.50"),
    },
    DemoPrescription {
        client: 2,
        shop: Some(1),
        date: (2026, 3, 3),
        service_type: ServiceType::Retorno,
        price: 0,
        payer: Payer::Pendente,
        spherical: ("+0.75", "+0.75"),
    },
    DemoPrescription {
        client: 3,
        shop: None,
        date: (2026, 2, 21),
        service_type: ServiceType::ExameVista,
        price: 150,
        payer: Payer::PagoCliente,
        spherical: ("-2.00", "-2.25"),
    },
];

/// Errors while loading the demo data set.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid demo client name: {0}")]
    Name(#[from] ClientNameError),
    #[error("invalid demo date {0:?}")]
    Date((i32, u32, u32)),
    #[error("inconsistent demo data: {0}")]
    Reference(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// IDs assigned while loading, in data set order.
#[derive(Debug, Clone, Default)]
pub struct DemoIds {
    pub shops: Vec<ShopId>,
    pub clients: Vec<ClientId>,
}

impl DemoIds {
    fn shop(&self, index: Option<usize>) -> Result<Option<ShopId>, DemoError> {
        index
            .map(|i| {
                self.shops
                    .get(i)
                    .copied()
                    .ok_or(DemoError::Reference("shop index"))
            })
            .transpose()
    }

    fn client(&self, index: usize) -> Result<ClientId, DemoError> {
        self.clients
            .get(index)
            .copied()
            .ok_or(DemoError::Reference("client index"))
    }
}

fn shop_input(name: &str) -> CreateShopInput {
    CreateShopInput {
        name: name.to_string(),
        ..CreateShopInput::default()
    }
}

fn prescription_input(
    ids: &DemoIds,
    demo: &DemoPrescription,
) -> Result<CreatePrescriptionInput, DemoError> {
    let (y, m, d) = demo.date;
    let date = NaiveDate::from_ymd_opt(y, m, d).ok_or(DemoError::Date(demo.date))?;

    let mut input = CreatePrescriptionInput::new(ids.client(demo.client)?, ids.shop(demo.shop)?, date);
    input.service_type = demo.service_type;
    input.price = Decimal::from(demo.price);
    input.payer = demo.payer;
    input.od = EyeMeasurements {
        spherical: Some(demo.spherical.0.to_string()),
        ..EyeMeasurements::default()
    };
    input.oe = EyeMeasurements {
        spherical: Some(demo.spherical.1.to_string()),
        ..EyeMeasurements::default()
    };
    Ok(input)
}

/// Load the demo data set into an in-memory store.
///
/// # Errors
///
/// Returns `DemoError` only if the built-in data set is inconsistent.
pub async fn load_memory(store: &MemoryStore) -> Result<DemoIds, DemoError> {
    let mut ids = DemoIds::default();
    for name in SHOPS {
        ids.shops.push(store.add_shop(shop_input(name)).await.id);
    }
    for (name, shop) in CLIENTS {
        let input = CreateClientInput::new(ClientName::parse(name)?, ids.shop(shop)?);
        ids.clients.push(store.add_client(input).await.id);
    }
    for demo in &PRESCRIPTIONS {
        store.add_prescription(prescription_input(&ids, demo)?).await;
    }
    Ok(ids)
}

/// Insert the demo data set through the `PostgreSQL` repositories.
///
/// # Errors
///
/// Returns `DemoError::Repository` if an insert fails.
pub async fn load_postgres(pool: &PgPool) -> Result<DemoIds, DemoError> {
    let shops = ShopRepository::new(pool);
    let clients = ClientRepository::new(pool);
    let prescriptions = PrescriptionRepository::new(pool);

    let mut ids = DemoIds::default();
    for name in SHOPS {
        ids.shops.push(shops.create(&shop_input(name)).await?.id);
    }
    for (name, shop) in CLIENTS {
        let input = CreateClientInput::new(ClientName::parse(name)?, ids.shop(shop)?);
        ids.clients.push(clients.create(&input).await?.id);
    }
    for demo in &PRESCRIPTIONS {
        prescriptions
            .create(&prescription_input(&ids, demo)?)
            .await?;
    }

    tracing::info!(
        shops = ids.shops.len(),
        clients = ids.clients.len(),
        prescriptions = PRESCRIPTIONS.len(),
        "Demo data inserted"
    );
    Ok(ids)
}
