use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use askama::Template;
use serde::Deserialize;

use crate::{
    db, filters,
    i18n::{self, Lang, Tr},
    models::{BarberRow, ServiceRow},
    state::AppState,
    store::{self, NewAppointment},
    templates::render,
};

/// Hourly slots matching opening hours, 02:00 AM through 10:00 PM.
pub const TIME_SLOTS: [&str; 21] = [
    "02:00 AM", "03:00 AM", "04:00 AM", "05:00 AM", "06:00 AM", "07:00 AM", "08:00 AM", "09:00 AM",
    "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
    "06:00 PM", "07:00 PM", "08:00 PM", "09:00 PM", "10:00 PM",
];

#[derive(Clone, Debug)]
struct BarberChoice {
    id: String,
    name: String,
    selected: bool,
}

#[derive(Clone, Debug)]
struct ServiceChoice {
    id: String,
    name: String,
    price: i64,
    selected: bool,
}

#[derive(Clone, Debug)]
struct SlotOption {
    value: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "book.html")]
struct BookingTemplate {
    tr: Tr,
    page: &'static str,
    next: &'static str,
    barbers: Vec<BarberChoice>,
    services: Vec<ServiceChoice>,
    slots: Vec<SlotOption>,
    customer_name: String,
    appointment_date: String,
    errors: Vec<String>,
    notice: String,
    has_notice: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct BookingForm {
    barber_id: Option<String>,
    service_id: Option<String>,
    customer_name: String,
    appointment_date: String,
    appointment_time: String,
}

#[derive(Deserialize)]
struct NoticeQuery {
    notice: Option<String>,
}

#[derive(Deserialize)]
struct LangQuery {
    next: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(show_booking)))
        .service(
            web::resource("/book")
                .route(web::get().to(show_booking))
                .route(web::post().to(create_booking)),
        )
        .service(web::resource("/lang/{code}").route(web::get().to(set_lang)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn set_lang(path: web::Path<String>, query: web::Query<LangQuery>) -> HttpResponse {
    let lang = Lang::from_code(&path.into_inner()).unwrap_or(Lang::En);
    let next = query.next.as_deref().unwrap_or("/");
    let next = if next.starts_with('/') { next } else { "/" };

    HttpResponse::SeeOther()
        .append_header((header::LOCATION, next.to_string()))
        .cookie(i18n::lang_cookie(lang))
        .finish()
}

async fn show_booking(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> Result<HttpResponse> {
    let lang = i18n::lang_from_request(&req);
    let barbers = store::active_barbers(&state.db).await.unwrap_or_default();
    let services = store::services_by_price(&state.db).await.unwrap_or_default();

    let notice = match query.notice.as_deref() {
        Some("confirmed") => "Appointment confirmed!".to_string(),
        _ => String::new(),
    };

    Ok(render(booking_page(
        lang,
        barbers,
        services,
        &BookingForm::default(),
        Vec::new(),
        notice,
    )))
}

async fn create_booking(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BookingForm>,
) -> Result<HttpResponse> {
    let lang = i18n::lang_from_request(&req);
    let form = form.into_inner();

    let errors = validate(&form);
    if !errors.is_empty() {
        let barbers = store::active_barbers(&state.db).await.unwrap_or_default();
        let services = store::services_by_price(&state.db).await.unwrap_or_default();
        return Ok(render(booking_page(
            lang,
            barbers,
            services,
            &form,
            errors,
            String::new(),
        )));
    }

    let customer_name = form.customer_name.trim();
    let appointment = NewAppointment {
        id: db::new_id(),
        barber_id: form.barber_id.clone().unwrap_or_default(),
        service_id: form.service_id.clone().unwrap_or_default(),
        customer_name: if customer_name.is_empty() {
            None
        } else {
            Some(customer_name.to_string())
        },
        appointment_date: form.appointment_date.trim().to_string(),
        appointment_time: form.appointment_time.trim().to_string(),
        created_at: db::now_rfc3339(),
    };

    match store::insert_appointment(&state.db, &appointment).await {
        Ok(()) => Ok(HttpResponse::SeeOther()
            .append_header((header::LOCATION, "/book?notice=confirmed"))
            .finish()),
        Err(err) => {
            log::error!("Booking insert failed: {err}");
            let barbers = store::active_barbers(&state.db).await.unwrap_or_default();
            let services = store::services_by_price(&state.db).await.unwrap_or_default();
            Ok(render(booking_page(
                lang,
                barbers,
                services,
                &form,
                vec!["Error booking appointment.".to_string()],
                String::new(),
            )))
        }
    }
}

fn validate(form: &BookingForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form
        .barber_id
        .as_deref()
        .map_or(true, |value| value.trim().is_empty())
    {
        errors.push("Please choose a barber.".to_string());
    }
    if form
        .service_id
        .as_deref()
        .map_or(true, |value| value.trim().is_empty())
    {
        errors.push("Please select a service.".to_string());
    }
    if form.appointment_date.trim().is_empty() {
        errors.push("Please pick a date.".to_string());
    }
    if form.appointment_time.trim().is_empty() {
        errors.push("Please select a time.".to_string());
    }
    errors
}

fn booking_page(
    lang: Lang,
    barbers: Vec<BarberRow>,
    services: Vec<ServiceRow>,
    form: &BookingForm,
    errors: Vec<String>,
    notice: String,
) -> BookingTemplate {
    let selected_barber = form.barber_id.as_deref().unwrap_or_default();
    let selected_service = form.service_id.as_deref().unwrap_or_default();

    let barbers = barbers
        .into_iter()
        .map(|barber| BarberChoice {
            selected: barber.id == selected_barber,
            id: barber.id,
            name: barber.name,
        })
        .collect();

    let services = services
        .into_iter()
        .map(|service| ServiceChoice {
            selected: service.id == selected_service,
            name: service.localized_name(lang).to_string(),
            price: service.price,
            id: service.id,
        })
        .collect();

    let slots = TIME_SLOTS
        .iter()
        .copied()
        .map(|slot| SlotOption {
            value: slot,
            selected: slot == form.appointment_time,
        })
        .collect();

    let has_notice = !notice.is_empty();
    BookingTemplate {
        tr: Tr { lang },
        page: "booking",
        next: "/book",
        barbers,
        services,
        slots,
        customer_name: form.customer_name.clone(),
        appointment_date: form.appointment_date.clone(),
        errors,
        notice,
        has_notice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::App;

    fn full_form() -> Vec<(&'static str, &'static str)> {
        vec![
            ("barber_id", "b-1"),
            ("service_id", "s-1"),
            ("customer_name", "Aram"),
            ("appointment_date", "2024-05-05"),
            ("appointment_time", "02:00 PM"),
        ]
    }

    #[test]
    fn validate_requires_barber_service_date_and_time() {
        let form = BookingForm {
            barber_id: Some("b-1".to_string()),
            service_id: Some("s-1".to_string()),
            customer_name: String::new(),
            appointment_date: "2024-05-05".to_string(),
            appointment_time: "02:00 PM".to_string(),
        };
        assert!(validate(&form).is_empty());

        let mut missing_barber = form.clone();
        missing_barber.barber_id = None;
        assert_eq!(validate(&missing_barber).len(), 1);

        let mut missing_service = form.clone();
        missing_service.service_id = Some("  ".to_string());
        assert_eq!(validate(&missing_service).len(), 1);

        let mut missing_date = form.clone();
        missing_date.appointment_date = String::new();
        assert_eq!(validate(&missing_date).len(), 1);

        let mut missing_time = form;
        missing_time.appointment_time = String::new();
        assert_eq!(validate(&missing_time).len(), 1);

        assert_eq!(validate(&BookingForm::default()).len(), 4);
    }

    #[test]
    fn time_slots_cover_opening_hours() {
        assert_eq!(TIME_SLOTS.len(), 21);
        assert_eq!(TIME_SLOTS[0], "02:00 AM");
        assert_eq!(TIME_SLOTS[20], "10:00 PM");
    }

    #[actix_web::test]
    async fn submit_without_required_fields_writes_nothing() {
        let pool = crate::db::test_pool().await;
        let state = AppState { db: pool.clone() };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/book")
            .set_form(vec![
                ("customer_name", "Aram"),
                ("appointment_date", ""),
                ("appointment_time", ""),
            ])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn successful_submit_inserts_and_redirects_to_a_fresh_form() {
        let pool = crate::db::test_pool().await;
        let state = AppState { db: pool.clone() };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/book")
            .set_form(full_form())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert_eq!(location, "/book?notice=confirmed");

        let rows = store::appointments_by_date(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barber_id, "b-1");
        assert_eq!(rows[0].service_id, "s-1");
        assert_eq!(rows[0].customer_name.as_deref(), Some("Aram"));
        assert_eq!(rows[0].appointment_date, "2024-05-05");
        assert_eq!(rows[0].appointment_time, "02:00 PM");
    }

    #[actix_web::test]
    async fn blank_customer_name_is_stored_as_null() {
        let pool = crate::db::test_pool().await;
        let state = AppState { db: pool.clone() };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let mut form = full_form();
        form[2] = ("customer_name", "   ");
        let req = actix_test::TestRequest::post()
            .uri("/book")
            .set_form(form)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let rows = store::appointments_by_date(&pool).await.unwrap();
        assert_eq!(rows[0].customer_name, None);
    }
}
