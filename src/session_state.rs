use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::FromRequest;
use futures_util::future::{ready, Ready};
use uuid::Uuid;

const USER_ID_KEY: &str = "user_id";

pub struct TypedSession(pub Session);

impl TypedSession {
    pub fn get_user_id(&self) -> Result<Option<Uuid>, SessionGetError>{
        self.0.get(USER_ID_KEY)
    }

    // Renews the session id before storing the identity, avoiding fixation
    pub fn log_in(&self, user_id: Uuid) -> Result<(), SessionInsertError>{
        self.0.renew();
        self.0.insert(USER_ID_KEY, user_id)
    }

    pub fn purge(&self){
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req.get_session();
        ready(Ok(TypedSession(session)))
    }
}
