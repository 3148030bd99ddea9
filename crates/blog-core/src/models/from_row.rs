#![cfg(feature = "postgres")]

use sqlx_core::from_row::FromRow;
use sqlx_core::row::Row;
use sqlx_postgres::PgRow;

use super::*;

macro_rules! impl_from_row {
    ($ty:ty, $row:ident => $body:block) => {
        impl FromRow<'_, PgRow> for $ty {
            fn from_row($row: &PgRow) -> Result<Self, sqlx_core::Error> {
                $body
            }
        }
    };
}

impl_from_row!(User, row => {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            full_name: row.try_get("full_name")?,
            birthdate: row.try_get("birthdate")?,
            display_name: row.try_get("display_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
);

impl_from_row!(Role, row => {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }
);

impl_from_row!(UserRole, row => {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            role_id: row.try_get("role_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
);
