#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
};

pub mod product {
    use sea_orm::entity::prelude::*;
    use tenant_guard::TenantEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, TenantEntity)]
    #[sea_orm(table_name = "product")]
    #[tenant(col = "tenant_id")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub product_id: i64,
        pub tenant_id: i64,
        pub sku: String,
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod category {
    use sea_orm::entity::prelude::*;
    use tenant_guard::TenantEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, TenantEntity)]
    #[sea_orm(table_name = "category")]
    #[tenant(col = "tenant_id")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub category_id: i64,
        pub tenant_id: i64,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// A tenant record does not belong to itself.
pub mod tenant {
    use sea_orm::entity::prelude::*;
    use tenant_guard::TenantEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, TenantEntity)]
    #[sea_orm(table_name = "tenant")]
    #[tenant(global)]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub tenant_id: i64,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Tenant column with a non-default name, declared without the derive.
pub mod invoice {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "invoice")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub invoice_id: i64,
        pub org_id: i64,
        pub total_cents: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl tenant_guard::TenantEntity for Entity {
        fn tenant_col() -> Option<Self::Column> {
            Some(Column::OrgId)
        }
    }
}

/// Tenant column stored as text: cannot be scoped.
pub mod legacy {
    use sea_orm::entity::prelude::*;
    use tenant_guard::TenantEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, TenantEntity)]
    #[sea_orm(table_name = "legacy_record")]
    #[tenant(col = "tenant_id")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub tenant_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Connect to a fresh in-memory `SQLite` database with the test schema.
///
/// A single pooled connection keeps every query on the same in-memory
/// database, so only one transaction can be open at a time.
pub async fn bring_up_sqlite() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to database");

    create_table(&db, product::Entity).await;
    create_table(&db, category::Entity).await;
    create_table(&db, tenant::Entity).await;
    create_table(&db, invoice::Entity).await;
    db
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&stmt))
        .await
        .expect("Failed to create table");
}
