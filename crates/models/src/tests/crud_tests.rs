use crate::db::connect_in_memory;
use crate::user;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};

fn sample(email: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        first_name: Set("John".into()),
        last_name: Set("Doe".into()),
        birthday: Set(NaiveDate::from_ymd_opt(1999, 2, 22).unwrap()),
        country: Set(Some("Ukraine".into())),
        city: Set(Some("Kyiv".into())),
        street: Set(Some("Shevchenka".into())),
        house_number: Set(Some(23)),
        apartment_number: Set(Some(22)),
        phone: Set(Some("+380765432105".into())),
    }
}

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    // Create
    let created = sample("johndoe@domain.com").insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.birthday, NaiveDate::from_ymd_opt(1999, 2, 22).unwrap());
    assert_eq!(created.house_number, Some(23));

    // Read
    let found = user::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    // Find by email
    let by_email = user::Entity::find()
        .filter(user::Column::Email.eq("johndoe@domain.com"))
        .one(&db)
        .await?;
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    // Update
    let mut am: user::ActiveModel = created.clone().into();
    am.city = Set(None);
    am.first_name = Set("Jane".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.city, None);

    // Delete
    let res = user::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Ids are assigned by the store and never reused within a table
#[tokio::test]
async fn test_ids_are_assigned_in_order() -> Result<()> {
    let db = connect_in_memory().await?;
    let a = sample("a@domain.com").insert(&db).await?;
    let b = sample("b@domain.com").insert(&db).await?;
    assert!(b.id > a.id);
    Ok(())
}

/// The table rejects a second row with the same email
#[tokio::test]
async fn test_email_is_unique() -> Result<()> {
    let db = connect_in_memory().await?;
    sample("dup@domain.com").insert(&db).await?;
    assert!(sample("dup@domain.com").insert(&db).await.is_err());
    Ok(())
}
