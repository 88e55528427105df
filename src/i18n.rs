use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

const LANG_COOKIE: &str = "pb_lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ku,
    Ar,
}

impl Lang {
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "ku" => Some(Lang::Ku),
            "ar" => Some(Lang::Ar),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ku => "ku",
            Lang::Ar => "ar",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::Ku | Lang::Ar)
    }
}

/// Looks up a display string for the given locale. Missing keys are
/// non-fatal: the key itself is returned.
pub fn translate<'a>(lang: Lang, key: &'a str) -> &'a str {
    let found = match lang {
        Lang::En => en(key),
        Lang::Ku => ku(key),
        Lang::Ar => ar(key),
    };
    found.unwrap_or(key)
}

pub fn lang_from_request(req: &HttpRequest) -> Lang {
    req.cookie(LANG_COOKIE)
        .and_then(|cookie| Lang::from_code(cookie.value()))
        .unwrap_or(Lang::En)
}

pub fn lang_cookie(lang: Lang) -> Cookie<'static> {
    Cookie::build(LANG_COOKIE, lang.code())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .finish()
}

/// Translation handle carried by every template.
#[derive(Clone, Copy)]
pub struct Tr {
    pub lang: Lang,
}

impl Tr {
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.lang, key)
    }

    pub fn dir(&self) -> &'static str {
        if self.lang.is_rtl() {
            "rtl"
        } else {
            "ltr"
        }
    }

    pub fn code(&self) -> &'static str {
        self.lang.code()
    }

    pub fn is(&self, code: &str) -> bool {
        self.lang.code() == code
    }
}

fn en(key: &str) -> Option<&'static str> {
    let value = match key {
        "premiumBarber" => "Premium Barber",
        "bookNow" => "Book Now",
        "dashboard" => "Dashboard",
        "bookYourAppointment" => "Book Your Appointment",
        "selectPreferredBarber" => "Select your preferred barber and time slot",
        "chooseYourBarber" => "Choose Your Barber",
        "selectService" => "Select Service",
        "yourName" => "Your Name",
        "optional" => "(Optional)",
        "enterYourName" => "Enter your name",
        "date" => "Date",
        "time" => "Time",
        "selectTime" => "Select time",
        "confirmAppointment" => "Confirm Appointment",
        "hoursOfOperation" => "Hours of Operation",
        "friday" => "Friday",
        "otherDays" => "Other Days",
        "ourBarbers" => "Our Barbers",
        "services" => "Services",
        "totalAppointments" => "Total Appointments",
        "todaysBookings" => "Today's Bookings",
        "activeBarbers" => "Active Barbers",
        "upcoming" => "Upcoming",
        "total" => "Total",
        "today" => "Today",
        "upcomingAppointments" => "Upcoming Appointments",
        "noUpcomingAppointments" => "No upcoming appointments",
        "allAppointments" => "All Appointments",
        "noAppointmentsYet" => "No appointments yet",
        "iqd" => "IQD",
        "madeBy" => "Made by",
        "cancel" => "Cancel",
        "confirmCancel" => "Are you sure you want to cancel this appointment?",
        "appointmentCancelled" => "Appointment cancelled successfully",
        _ => return None,
    };
    Some(value)
}

fn ku(key: &str) -> Option<&'static str> {
    let value = match key {
        "premiumBarber" => "سەلمانێری پریمیۆم",
        "bookNow" => "نۆرە بگرە",
        "dashboard" => "داشبۆرد",
        "bookYourAppointment" => "نۆرەکەت بگرە",
        "selectPreferredBarber" => "سەلمانێر و کاتەکەت هەڵبژێرە",
        "chooseYourBarber" => "سەلمانێرەکەت هەڵبژێرە",
        "selectService" => "خزمەتگوزاری هەڵبژێرە",
        "yourName" => "ناوت",
        "optional" => "(ئارەزوومەندانە)",
        "enterYourName" => "ناوت بنووسە",
        "date" => "بەروار",
        "time" => "کات",
        "selectTime" => "کات هەڵبژێرە",
        "confirmAppointment" => "نۆرە پشتڕاست بکەرەوە",
        "hoursOfOperation" => "کاتی کارکردن",
        "friday" => "هەینی",
        "otherDays" => "ڕۆژانی تر",
        "ourBarbers" => "سەلمانێرەکانمان",
        "services" => "خزمەتگوزاریەکان",
        "totalAppointments" => "کۆی نۆرەکان",
        "todaysBookings" => "نۆرەکانی ئەمڕۆ",
        "activeBarbers" => "سەلمانێرە چالاکەکان",
        "upcoming" => "داهاتوو",
        "total" => "کۆ",
        "today" => "ئەمڕۆ",
        "upcomingAppointments" => "نۆرە داهاتووەکان",
        "noUpcomingAppointments" => "هیچ نۆرەیەکی داهاتوو نییە",
        "allAppointments" => "هەموو نۆرەکان",
        "noAppointmentsYet" => "هێشتا هیچ نۆرەیەک نییە",
        "iqd" => "د.ع",
        "madeBy" => "دروستکراوە لەلایەن",
        "cancel" => "لابردن",
        "confirmCancel" => "ئایا دڵنیایت کە دەتەوێ ئەم نۆرە لابدەی؟",
        "appointmentCancelled" => "نۆرە بە سەرکەوتویی لابرا",
        _ => return None,
    };
    Some(value)
}

fn ar(key: &str) -> Option<&'static str> {
    let value = match key {
        "premiumBarber" => "حلاق بريميوم",
        "bookNow" => "احجز الآن",
        "dashboard" => "لوحة التحكم",
        "bookYourAppointment" => "احجز موعدك",
        "selectPreferredBarber" => "اختر الحلاق والوقت المفضل",
        "chooseYourBarber" => "اختر الحلاق",
        "selectService" => "اختر الخدمة",
        "yourName" => "اسمك",
        "optional" => "(اختياري)",
        "enterYourName" => "أدخل اسمك",
        "date" => "التاريخ",
        "time" => "الوقت",
        "selectTime" => "اختر الوقت",
        "confirmAppointment" => "تأكيد الموعد",
        "hoursOfOperation" => "ساعات العمل",
        "friday" => "الجمعة",
        "otherDays" => "الأيام الأخرى",
        "ourBarbers" => "حلاقونا",
        "services" => "الخدمات",
        "totalAppointments" => "إجمالي المواعيد",
        "todaysBookings" => "حجوزات اليوم",
        "activeBarbers" => "الحلاقون النشطون",
        "upcoming" => "القادمة",
        "total" => "الإجمالي",
        "today" => "اليوم",
        "upcomingAppointments" => "المواعيد القادمة",
        "noUpcomingAppointments" => "لا توجد مواعيد قادمة",
        "allAppointments" => "جميع المواعيد",
        "noAppointmentsYet" => "لا توجد مواعيد بعد",
        "iqd" => "د.ع",
        "madeBy" => "صنع بواسطة",
        "cancel" => "إلغاء",
        "confirmCancel" => "هل تريد بالتأكيد إلغاء هذا الموعد؟",
        "appointmentCancelled" => "تم إلغاء الموعد بنجاح",
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 34] = [
        "premiumBarber",
        "bookNow",
        "dashboard",
        "bookYourAppointment",
        "selectPreferredBarber",
        "chooseYourBarber",
        "selectService",
        "yourName",
        "optional",
        "enterYourName",
        "date",
        "time",
        "selectTime",
        "confirmAppointment",
        "hoursOfOperation",
        "friday",
        "otherDays",
        "ourBarbers",
        "services",
        "totalAppointments",
        "todaysBookings",
        "activeBarbers",
        "upcoming",
        "total",
        "today",
        "upcomingAppointments",
        "noUpcomingAppointments",
        "allAppointments",
        "noAppointmentsYet",
        "iqd",
        "madeBy",
        "cancel",
        "confirmCancel",
        "appointmentCancelled",
    ];

    #[test]
    fn every_key_resolves_in_every_locale() {
        for lang in [Lang::En, Lang::Ku, Lang::Ar] {
            for key in KEYS {
                let value = translate(lang, key);
                assert!(!value.is_empty(), "{key} empty for {:?}", lang);
                // Repeated lookups are stable.
                assert_eq!(value, translate(lang, key));
            }
        }
    }

    #[test]
    fn missing_key_falls_back_to_the_key() {
        for lang in [Lang::En, Lang::Ku, Lang::Ar] {
            assert_eq!(translate(lang, "noSuchKey"), "noSuchKey");
        }
    }

    #[test]
    fn rtl_applies_to_kurdish_and_arabic_only() {
        assert!(!Lang::En.is_rtl());
        assert!(Lang::Ku.is_rtl());
        assert!(Lang::Ar.is_rtl());
    }

    #[test]
    fn lang_codes_round_trip() {
        for lang in [Lang::En, Lang::Ku, Lang::Ar] {
            assert_eq!(Lang::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Lang::from_code("de"), None);
    }
}
