//! Thin query client over the three backing collections. The views never
//! write SQL of their own: everything goes through `Select`, `insert_appointment`,
//! or `delete_by_id`.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use crate::models::{AppointmentRow, BarberRow, ServiceRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Barbers,
    Services,
    Appointments,
}

impl Collection {
    fn table(self) -> &'static str {
        match self {
            Collection::Barbers => "barbers",
            Collection::Services => "services",
            Collection::Appointments => "appointments",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub enum Arg {
    Int(i64),
    Text(String),
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

/// Select over one collection with at most one equality filter and one
/// ordering. Field names are compile-time literals, never user input.
pub struct Select {
    collection: Collection,
    filter: Option<(&'static str, Arg)>,
    order: Option<(&'static str, Order)>,
}

impl Select {
    pub fn from(collection: Collection) -> Self {
        Select {
            collection,
            filter: None,
            order: None,
        }
    }

    pub fn filter_eq(mut self, field: &'static str, value: impl Into<Arg>) -> Self {
        self.filter = Some((field, value.into()));
        self
    }

    pub fn order_by(mut self, field: &'static str, order: Order) -> Self {
        self.order = Some((field, order));
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("SELECT * FROM {}", self.collection.table());
        if let Some((field, _)) = &self.filter {
            sql.push_str(&format!(" WHERE {field} = ?"));
        }
        if let Some((field, order)) = &self.order {
            let direction = match order {
                Order::Asc => "ASC",
                Order::Desc => "DESC",
            };
            sql.push_str(&format!(" ORDER BY {field} {direction}"));
        }
        sql
    }

    pub async fn fetch<T>(self, pool: &SqlitePool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = self.sql();
        let mut query = sqlx::query_as::<_, T>(&sql);
        if let Some((_, arg)) = self.filter {
            query = match arg {
                Arg::Int(value) => query.bind(value),
                Arg::Text(value) => query.bind(value),
            };
        }
        query.fetch_all(pool).await
    }
}

pub async fn active_barbers(pool: &SqlitePool) -> Result<Vec<BarberRow>, sqlx::Error> {
    Select::from(Collection::Barbers)
        .filter_eq("active", 1)
        .order_by("name", Order::Asc)
        .fetch(pool)
        .await
}

pub async fn services_by_price(pool: &SqlitePool) -> Result<Vec<ServiceRow>, sqlx::Error> {
    Select::from(Collection::Services)
        .order_by("price", Order::Asc)
        .fetch(pool)
        .await
}

pub async fn all_services(pool: &SqlitePool) -> Result<Vec<ServiceRow>, sqlx::Error> {
    Select::from(Collection::Services).fetch(pool).await
}

pub async fn appointments_by_date(pool: &SqlitePool) -> Result<Vec<AppointmentRow>, sqlx::Error> {
    Select::from(Collection::Appointments)
        .order_by("appointment_date", Order::Asc)
        .fetch(pool)
        .await
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub id: String,
    pub barber_id: String,
    pub service_id: String,
    pub customer_name: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub created_at: String,
}

pub async fn insert_appointment(
    pool: &SqlitePool,
    appointment: &NewAppointment,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO appointments
           (id, barber_id, service_id, customer_name, appointment_date, appointment_time, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&appointment.id)
    .bind(&appointment.barber_id)
    .bind(&appointment.service_id)
    .bind(&appointment.customer_name)
    .bind(&appointment.appointment_date)
    .bind(&appointment.appointment_time)
    .bind(&appointment.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_by_id(
    pool: &SqlitePool,
    collection: Collection,
    id: &str,
) -> Result<(), sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", collection.table());
    sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(())
}
