use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set};

use models::user;

use crate::errors::ServiceError;
use crate::users::domain::{Address, User, UserId, ValidatedUser};
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// Ids outside the column range cannot exist in the table.
fn column_key(id: UserId) -> Option<i32> {
    i32::try_from(id).ok()
}

fn to_domain(m: user::Model) -> User {
    User {
        id: UserId::from(m.id),
        email: m.email,
        first_name: m.first_name,
        last_name: m.last_name,
        birthday: m.birthday,
        address: Address {
            country: m.country,
            city: m.city,
            street: m.street,
            house_number: m.house_number,
            apartment_number: m.apartment_number,
        },
        phone: m.phone,
    }
}

fn to_active(u: ValidatedUser) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        email: Set(u.email),
        first_name: Set(u.first_name),
        last_name: Set(u.last_name),
        birthday: Set(u.birthday),
        country: Set(u.address.country),
        city: Set(u.address.city),
        street: Set(u.address.street),
        house_number: Set(u.address.house_number),
        apartment_number: Set(u.address.apartment_number),
        phone: Set(u.phone),
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, user: ValidatedUser) -> Result<User, ServiceError> {
        let created = to_active(user).insert(&self.db).await.map_err(db_err)?;
        Ok(to_domain(created))
    }

    async fn update(&self, id: UserId, user: ValidatedUser) -> Result<User, ServiceError> {
        let key = column_key(id).ok_or(ServiceError::NotFound)?;
        let mut am = to_active(user);
        am.id = Set(key);
        let updated = am.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => ServiceError::NotFound,
            other => db_err(other),
        })?;
        Ok(to_domain(updated))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ServiceError> {
        let Some(key) = column_key(id) else { return Ok(None) };
        let found = user::Entity::find_by_id(key).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(to_domain))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), ServiceError> {
        if let Some(key) = column_key(id) {
            user::Entity::delete_by_id(key).exec(&self.db).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }
}
