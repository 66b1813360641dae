//! Tables of the demo application.

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

pub mod tenant {
    use sea_orm::entity::prelude::*;
    use tenant_guard::TenantEntity;

    /// A tenant does not belong to itself, so it is global.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, TenantEntity)]
    #[sea_orm(table_name = "tenant")]
    #[tenant(global)]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub tenant_id: i64,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product::Entity")]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

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
        #[sea_orm(unique)]
        pub sku: String,
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::tenant::Entity",
            from = "Column::TenantId",
            to = "super::tenant::Column::TenantId",
            on_delete = "Restrict"
        )]
        Tenant,
    }

    impl Related<super::tenant::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tenant.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Create the demo tables if they do not exist yet.
///
/// # Errors
/// Returns an error if a CREATE TABLE statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, tenant::Entity).await?;
    create_table(db, product::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt))
        .await
        .with_context(|| format!("failed to create table `{}`", entity.table_name()))?;
    tracing::debug!(table = entity.table_name(), "table ready");
    Ok(())
}
