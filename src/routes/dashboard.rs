use std::collections::HashMap;

use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use askama::Template;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{
    i18n::{self, Tr},
    models::{AppointmentRow, BarberRow, ServiceRow},
    state::AppState,
    store::{self, Collection},
    templates::render,
};

#[derive(Clone, Debug)]
struct AppointmentView {
    id: String,
    customer_name: String,
    barber_name: String,
    service_name: String,
    appointment_date: String,
    appointment_time: String,
}

#[derive(Clone, Debug)]
struct BarberCard {
    name: String,
    upcoming_count: usize,
    today_count: usize,
    total_count: usize,
    upcoming: Vec<AppointmentView>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    tr: Tr,
    page: &'static str,
    next: &'static str,
    notice: String,
    has_notice: bool,
    total_appointments: usize,
    todays_bookings: usize,
    active_barbers: usize,
    cards: Vec<BarberCard>,
    appointments: Vec<AppointmentView>,
}

#[derive(Deserialize)]
struct NoticeQuery {
    notice: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard").route(web::get().to(dashboard)))
        .service(web::resource("/dashboard/cancel/{id}").route(web::post().to(cancel_appointment)));
}

async fn dashboard(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NoticeQuery>,
) -> Result<HttpResponse> {
    let lang = i18n::lang_from_request(&req);

    let (barbers, appointments, services) = tokio::join!(
        store::active_barbers(&state.db),
        store::appointments_by_date(&state.db),
        store::all_services(&state.db),
    );
    let barbers = barbers.unwrap_or_default();
    let appointments = appointments.unwrap_or_default();
    let services = services.unwrap_or_default();

    let barbers_by_id: HashMap<&str, &BarberRow> =
        barbers.iter().map(|barber| (barber.id.as_str(), barber)).collect();
    let services_by_id: HashMap<&str, &ServiceRow> =
        services.iter().map(|service| (service.id.as_str(), service)).collect();

    let today = Local::now().date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();
    let todays = todays_appointments(&appointments, &today_str);

    let cards = barbers
        .iter()
        .map(|barber| {
            let upcoming = upcoming_for(&appointments, &barber.id, today);
            BarberCard {
                name: barber.name.clone(),
                upcoming_count: upcoming.len(),
                today_count: todays
                    .iter()
                    .filter(|apt| apt.barber_id == barber.id)
                    .count(),
                total_count: total_for(&appointments, &barber.id),
                upcoming: upcoming
                    .into_iter()
                    .take(5)
                    .map(|apt| to_view(apt, &barbers_by_id, &services_by_id))
                    .collect(),
            }
        })
        .collect();

    let notice = match query.notice.as_deref() {
        Some("cancelled") => i18n::translate(lang, "appointmentCancelled").to_string(),
        Some("cancel_failed") => "Error cancelling appointment.".to_string(),
        _ => String::new(),
    };

    let views: Vec<AppointmentView> = appointments
        .iter()
        .map(|apt| to_view(apt, &barbers_by_id, &services_by_id))
        .collect();

    let has_notice = !notice.is_empty();
    Ok(render(DashboardTemplate {
        tr: Tr { lang },
        page: "dashboard",
        next: "/dashboard",
        notice,
        has_notice,
        total_appointments: appointments.len(),
        todays_bookings: todays.len(),
        active_barbers: barbers.len(),
        cards,
        appointments: views,
    }))
}

async fn cancel_appointment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let appointment_id = path.into_inner();
    let location = match store::delete_by_id(&state.db, Collection::Appointments, &appointment_id).await
    {
        Ok(()) => "/dashboard?notice=cancelled",
        Err(err) => {
            log::error!("Cancel failed for {appointment_id}: {err}");
            "/dashboard?notice=cancel_failed"
        }
    };

    Ok(HttpResponse::SeeOther()
        .append_header((header::LOCATION, location))
        .finish())
}

/// Unmatched barber or service references render as blank.
fn to_view(
    apt: &AppointmentRow,
    barbers_by_id: &HashMap<&str, &BarberRow>,
    services_by_id: &HashMap<&str, &ServiceRow>,
) -> AppointmentView {
    let customer_name = apt
        .customer_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("Anonymous")
        .to_string();

    AppointmentView {
        id: apt.id.clone(),
        customer_name,
        barber_name: barbers_by_id
            .get(apt.barber_id.as_str())
            .map(|barber| barber.name.clone())
            .unwrap_or_default(),
        service_name: services_by_id
            .get(apt.service_id.as_str())
            .map(|service| service.name.clone())
            .unwrap_or_default(),
        appointment_date: apt.appointment_date.clone(),
        appointment_time: apt.appointment_time.clone(),
    }
}

/// Plain string equality against today's `%Y-%m-%d`; a differently formatted
/// date never matches.
fn todays_appointments<'a>(
    appointments: &'a [AppointmentRow],
    today: &str,
) -> Vec<&'a AppointmentRow> {
    appointments
        .iter()
        .filter(|apt| apt.appointment_date == today)
        .collect()
}

/// Date-only comparison: an appointment dated today counts as upcoming
/// regardless of its time slot. Unparseable dates are excluded.
fn upcoming_for<'a>(
    appointments: &'a [AppointmentRow],
    barber_id: &str,
    today: NaiveDate,
) -> Vec<&'a AppointmentRow> {
    appointments
        .iter()
        .filter(|apt| {
            apt.barber_id == barber_id
                && NaiveDate::parse_from_str(&apt.appointment_date, "%Y-%m-%d")
                    .map_or(false, |date| date >= today)
        })
        .collect()
}

fn total_for(appointments: &[AppointmentRow], barber_id: &str) -> usize {
    appointments
        .iter()
        .filter(|apt| apt.barber_id == barber_id)
        .count()
}
