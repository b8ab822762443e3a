use std::sync::{Mutex, PoisonError};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::{MAX_COOKIE_AGE_DAYS, SessionConfig};

/// Name and lifetime of the cookie that mirrors the access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookiePolicy {
    pub name: String,
    pub max_age_days: i64,
}

impl CookiePolicy {
    pub fn from_config(config: &SessionConfig) -> Self {
        CookiePolicy {
            name: config.cookie_name.clone(),
            max_age_days: config.cookie_max_age_days,
        }
    }

    /// `<name>=<token>; Path=/; SameSite=Lax` expiring `max_age_days` from now.
    ///
    /// The lifetime is clamped to `0..=MAX_COOKIE_AGE_DAYS`.
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        let lifetime = Duration::days(self.max_age_days.clamp(0, MAX_COOKIE_AGE_DAYS));
        Cookie::build((self.name.clone(), token.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(lifetime)
            .expires(OffsetDateTime::now_utc() + lifetime)
            .build()
    }

    /// An already-expired cookie that makes a browser drop the mirror.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), String::new()))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

/// A cookie store the session can write its access token into.
///
/// The route guard reads the same cookie from incoming navigations; it never
/// sees the durable session record.
pub trait CookieMirror: Send + Sync {
    fn set(&self, cookie: Cookie<'static>);
    /// Drops the cookie named like `removal`; `removal` carries the expiry a browser needs.
    fn remove(&self, removal: Cookie<'static>);
    fn get(&self, name: &str) -> Option<String>;
}

/// An in-process cookie jar, standing in for the browser's.
pub struct MemoryCookieJar {
    jar: Mutex<CookieJar>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        MemoryCookieJar {
            jar: Mutex::new(CookieJar::new()),
        }
    }

    /// Renders the named cookie as a `Set-Cookie` header value.
    pub fn set_cookie_header(&self, name: &str) -> Option<String> {
        self.jar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|cookie| cookie.to_string())
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMirror for MemoryCookieJar {
    fn set(&self, cookie: Cookie<'static>) {
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        *jar = jar.clone().add(cookie);
    }

    fn remove(&self, removal: Cookie<'static>) {
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        *jar = jar.clone().remove(removal);
    }

    fn get(&self, name: &str) -> Option<String> {
        self.jar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|cookie| cookie.value().to_string())
    }
}
