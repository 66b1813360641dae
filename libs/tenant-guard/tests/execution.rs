#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Executes scoped queries against `SQLite` and checks that rows of other
//! tenants are never read or written.

mod common;

use common::{bring_up_sqlite, product};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, TransactionTrait,
    sea_query::Expr,
};
use tenant_guard::{ScopeError, TenantId, TenantScopeExt, scope, scope_entity};

const ACME: TenantId = TenantId::new(1);
const GLOBEX: TenantId = TenantId::new(2);

async fn add_product(txn: &DatabaseTransaction, tenant: TenantId, sku: &str) -> product::Model {
    let mut model = product::ActiveModel {
        sku: Set(sku.to_owned()),
        description: Set(None),
        ..Default::default()
    };
    scope(txn, tenant, &mut model)
        .unwrap()
        .insert(model)
        .await
        .unwrap()
}

async fn seed(txn: &DatabaseTransaction) {
    for sku in ["A-1", "A-2", "A-3"] {
        add_product(txn, ACME, sku).await;
    }
    for sku in ["G-1", "G-2"] {
        add_product(txn, GLOBEX, sku).await;
    }
}

fn skus(rows: &[product::Model]) -> Vec<&str> {
    rows.iter().map(|p| p.sku.as_str()).collect()
}

#[tokio::test]
async fn select_only_returns_rows_of_the_tenant() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    seed(&txn).await;

    let acme = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .order_by_asc(product::Column::Sku)
        .all()
        .await
        .unwrap();
    assert_eq!(skus(&acme), ["A-1", "A-2", "A-3"]);
    assert!(acme.iter().all(|p| p.tenant_id == 1));

    let globex_count = scope_entity::<product::Entity>(&txn, GLOBEX)
        .unwrap()
        .count()
        .await
        .unwrap();
    assert_eq!(globex_count, 2);

    let nobody = scope_entity::<product::Entity>(&txn, TenantId::new(0))
        .unwrap()
        .all()
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn caller_filter_cannot_widen_the_tenant_restriction() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    seed(&txn).await;

    // Asks for a Globex SKU while scoped to Acme.
    let found = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .filter(product::Column::Sku.eq("G-1"))
        .one()
        .await
        .unwrap();
    assert!(found.is_none());

    let found = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .filter(product::Column::TenantId.eq(2))
        .all()
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn ordering_limit_and_offset_compose_with_the_scope() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    seed(&txn).await;

    let page = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .order_by_desc(product::Column::Sku)
        .limit(2)
        .offset(1)
        .all()
        .await
        .unwrap();
    assert_eq!(skus(&page), ["A-2", "A-1"]);
}

#[tokio::test]
async fn insert_lands_in_the_handle_tenant() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();

    let mut model = product::ActiveModel {
        tenant_id: Set(99),
        sku: Set("A-9".to_owned()),
        description: Set(Some("widget".to_owned())),
        ..Default::default()
    };
    let query = scope(&txn, ACME, &mut model).unwrap();

    // A different instance that still claims another tenant.
    let smuggled = product::ActiveModel {
        tenant_id: Set(2),
        sku: Set("A-10".to_owned()),
        description: Set(None),
        ..Default::default()
    };
    let inserted = query.insert(smuggled).await.unwrap();
    assert_eq!(inserted.tenant_id, 1);

    let inserted = scope(&txn, ACME, &mut model)
        .unwrap()
        .insert(model)
        .await
        .unwrap();
    assert_eq!(inserted.tenant_id, 1);
    assert_eq!(inserted.description.as_deref(), Some("widget"));

    let globex_rows = scope_entity::<product::Entity>(&txn, GLOBEX)
        .unwrap()
        .count()
        .await
        .unwrap();
    assert_eq!(globex_rows, 0);
}

#[tokio::test]
async fn update_many_and_delete_many_stay_inside_the_tenant() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    seed(&txn).await;

    let updated = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .update_many([(
            product::Column::Description,
            Expr::value("discontinued"),
        )])
        .await
        .unwrap();
    assert_eq!(updated, 3);

    let globex = scope_entity::<product::Entity>(&txn, GLOBEX)
        .unwrap()
        .all()
        .await
        .unwrap();
    assert!(globex.iter().all(|p| p.description.is_none()));

    let deleted = scope_entity::<product::Entity>(&txn, GLOBEX)
        .unwrap()
        .filter(product::Column::Sku.eq("G-1"))
        .delete_many()
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let deleted = scope_entity::<product::Entity>(&txn, GLOBEX)
        .unwrap()
        .filter(product::Column::Sku.starts_with("A-"))
        .delete_many()
        .await
        .unwrap();
    assert_eq!(deleted, 0);

    let remaining = product::Entity::find().all(&txn).await.unwrap();
    assert_eq!(remaining.len(), 4);
}

#[tokio::test]
async fn update_many_rejects_tenant_reassignment_and_empty_sets() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    seed(&txn).await;

    let err = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .update_many([(product::Column::TenantId, Expr::value(2_i64))])
        .await
        .unwrap_err();
    assert!(matches!(err, ScopeError::Invalid(_)), "got {err:?}");

    let err = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .update_many(Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ScopeError::Invalid(_)), "got {err:?}");

    let acme = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .count()
        .await
        .unwrap();
    assert_eq!(acme, 3);
}

#[tokio::test]
async fn single_row_update_cannot_touch_another_tenant() {
    let db = bring_up_sqlite().await;
    let txn = db.begin().await.unwrap();
    let globex_row = add_product(&txn, GLOBEX, "G-1").await;

    let mut hijack = product::ActiveModel {
        product_id: Set(globex_row.product_id),
        sku: Set("stolen".to_owned()),
        ..Default::default()
    };
    let err = txn
        .tenant_scoped(ACME, &mut hijack)
        .unwrap()
        .update(hijack)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScopeError::Db(DbErr::RecordNotUpdated)),
        "got {err:?}"
    );

    let mut rename = product::ActiveModel {
        product_id: Set(globex_row.product_id),
        sku: Set("G-1b".to_owned()),
        ..Default::default()
    };
    let renamed = txn
        .tenant_scoped(GLOBEX, &mut rename)
        .unwrap()
        .update(rename)
        .await
        .unwrap();
    assert_eq!(renamed.sku, "G-1b");
    assert_eq!(renamed.tenant_id, 2);
}

#[tokio::test]
async fn committed_rows_survive_and_stay_scoped() {
    let db = bring_up_sqlite().await;

    let txn = db.begin().await.unwrap();
    seed(&txn).await;
    txn.commit().await.unwrap();

    let txn = db.begin().await.unwrap();
    let acme = scope_entity::<product::Entity>(&txn, ACME)
        .unwrap()
        .count()
        .await
        .unwrap();
    assert_eq!(acme, 3);
    txn.rollback().await.unwrap();
}
