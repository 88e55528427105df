use crate::i18n::Lang;

#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BarberRow {
    pub id: String,
    pub name: String,
    pub active: i64,
    pub created_at: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceRow {
    pub id: String,
    pub name: String,
    pub name_ku: String,
    pub name_ar: String,
    pub price: i64,
    pub created_at: String,
}

impl ServiceRow {
    /// Localized display name. English and any unknown locale fall back to
    /// the base name column.
    pub fn localized_name(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ku => &self.name_ku,
            Lang::Ar => &self.name_ar,
            Lang::En => &self.name,
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: String,
    pub barber_id: String,
    pub service_id: String,
    pub customer_name: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ServiceRow {
        ServiceRow {
            id: "svc-1".to_string(),
            name: "Haircut".to_string(),
            name_ku: "قژبڕین".to_string(),
            name_ar: "قص شعر".to_string(),
            price: 10000,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn localized_name_picks_locale_column() {
        let svc = service();
        assert_eq!(svc.localized_name(Lang::Ku), "قژبڕین");
        assert_eq!(svc.localized_name(Lang::Ar), "قص شعر");
        assert_eq!(svc.localized_name(Lang::En), "Haircut");
    }
}
