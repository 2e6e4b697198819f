//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use stockroom_app::{
    context::AppContext,
    domain::{
        images::MockImageStore,
        inventory::MockInventoryService,
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{Category, ProductId, ProductRecord},
        },
        reports::MockReportsService,
    },
};

use crate::state::State;

/// Service mocks behind a test router. Mocks left at their defaults fail the
/// test on any call.
#[derive(Default)]
pub(crate) struct TestServices {
    pub(crate) products: MockProductsService,
    pub(crate) inventory: MockInventoryService,
    pub(crate) orders: MockOrdersService,
    pub(crate) reports: MockReportsService,
    pub(crate) images: MockImageStore,
}

impl TestServices {
    pub(crate) fn with_products(products: MockProductsService) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_inventory(inventory: MockInventoryService) -> Self {
        Self {
            inventory,
            ..Self::default()
        }
    }

    pub(crate) fn with_orders(orders: MockOrdersService) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub(crate) fn with_reports(reports: MockReportsService) -> Self {
        Self {
            reports,
            ..Self::default()
        }
    }

    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            inventory: Arc::new(self.inventory),
            orders: Arc::new(self.orders),
            reports: Arc::new(self.reports),
            images: Arc::new(self.images),
        })
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn make_product(id: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: "Laptop Pro 15".to_string(),
        description: "High-performance laptop".to_string(),
        price: Decimal::new(129_999, 2),
        category: Category::Electronics,
        image_path: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
