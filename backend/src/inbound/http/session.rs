//! The signed-in actor, as carried by the session cookie.
//!
//! The cookie holds an authenticated user id and nothing else. Household
//! roles are never cached here; every household request resolves the actor's
//! role from storage, so a role change or removal applies on the next call.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const ACTOR_KEY: &str = "actor";

/// Session extractor exposing sign-in, sign-out and actor lookup.
#[derive(Clone)]
pub struct ActorSession(Session);

impl ActorSession {
    /// Wrap an actix session.
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user_id` to a freshly renewed session.
    pub fn sign_in(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACTOR_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to write session: {error}")))
    }

    /// Drop every session entry and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// The signed-in user, if any.
    ///
    /// A cookie holding something other than a UUID counts as anonymous.
    pub fn actor(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(ACTOR_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| {
            UserId::new(&value)
                .inspect_err(|error| warn!(%error, "discarding malformed actor in session"))
                .ok()
        }))
    }

    /// The signed-in user or `401 Unauthorized`.
    pub fn require_actor(&self) -> Result<UserId, Error> {
        self.actor()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for ActorSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
