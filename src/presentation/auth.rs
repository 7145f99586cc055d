use crate::domain::error::DomainError;
use crate::domain::user::{LoginForm, SignUpForm};
use crate::domain::validation::{FieldError, validate_sign_up};
use crate::presentation::error::SiteError;
use crate::presentation::flash::{Flash, IncomingFlash};
use crate::presentation::handlers::{AppState, redirect};
use crate::presentation::middleware::{
    MaybeUser, SESSION_COOKIE, session_cookie, session_removal_cookie,
};
use crate::presentation::views::{Layout, LoginTemplate, SignUpTemplate, render_page};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{error, info, instrument, warn};

fn sign_up_page(
    status: StatusCode,
    title: &str,
    errors: Vec<FieldError>,
    form: &SignUpForm,
    flash: &IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let page = SignUpTemplate {
        layout: Layout::new(title, flash, None),
        errors,
        first_name: form.first_name.trim().to_string(),
        surname: form.surname.trim().to_string(),
        email: form.email.trim().to_string(),
    };
    render_page(status, &page, flash)
}

#[instrument(skip_all)]
pub async fn sign_up_get(user: MaybeUser, flash: IncomingFlash) -> Result<HttpResponse, SiteError> {
    if user.0.is_some() {
        return Ok(redirect("/").finish());
    }
    sign_up_page(
        StatusCode::OK,
        "User Sign Up",
        Vec::new(),
        &SignUpForm::default(),
        &flash,
    )
}

#[instrument(skip(state, user, form, flash), fields(email = %form.email))]
pub async fn sign_up_post(
    state: web::Data<AppState>,
    user: MaybeUser,
    form: web::Form<SignUpForm>,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    if let Some(current) = user.0 {
        info!(user_id = %current.id, "Sign-up attempted while signed in");
        return Ok(redirect("/").finish());
    }
    info!("Sign-up request received");

    let new_user = match validate_sign_up(&form) {
        Ok(new_user) => new_user,
        Err(errors) => {
            warn!(errors = errors.len(), "Sign-up form rejected");
            return sign_up_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please fix the following errors:",
                errors,
                &form,
                &flash,
            );
        }
    };

    let user = match state.auth_service.register_user(new_user).await {
        Ok(user) => user,
        Err(e) if matches!(e.downcast_ref::<DomainError>(), Some(DomainError::EmailTaken)) => {
            warn!("Sign-up with an already registered email");
            let errors = vec![FieldError {
                field: "email",
                message: DomainError::EmailTaken.to_string(),
            }];
            return sign_up_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please fix the following errors:",
                errors,
                &form,
                &flash,
            );
        }
        Err(e) => {
            error!(error = %e, "Error while registering");
            return Err(e.into());
        }
    };

    // Registration continues straight into a logged-in session.
    let token = state.auth_service.open_session(&user).await?;
    info!(user_id = %user.id, "User registered and logged in");

    Ok(redirect("/")
        .cookie(session_cookie(token))
        .cookie(Flash::Registered.cookie())
        .finish())
}

#[instrument(skip_all)]
pub async fn login_get(user: MaybeUser, flash: IncomingFlash) -> Result<HttpResponse, SiteError> {
    if user.0.is_some() {
        return Ok(redirect("/").finish());
    }
    let page = LoginTemplate {
        layout: Layout::new("Login to continue", &flash, None),
    };
    render_page(StatusCode::OK, &page, &flash)
}

#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login_post(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, SiteError> {
    info!("Login request received");

    match state.auth_service.login(form.into_inner()).await {
        Ok((user, token)) => {
            info!(user_id = %user.id, "Login successful");
            Ok(redirect("/")
                .cookie(session_cookie(token))
                .cookie(Flash::LoggedIn.cookie())
                .finish())
        }
        Err(e) if matches!(e.downcast_ref::<DomainError>(), Some(DomainError::Unauthorized(_))) => {
            warn!("Login failed");
            Ok(redirect("/login")
                .cookie(Flash::LoginFailed.cookie())
                .finish())
        }
        Err(e) => {
            error!(error = %e, "Failed to login");
            Err(e.into())
        }
    }
}

#[instrument(skip_all)]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, SiteError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.auth_service.logout(cookie.value()).await.map_err(|e| {
            error!(error = %e, "Failed to end session");
            SiteError::from(e)
        })?;
    }

    Ok(redirect("/")
        .cookie(session_removal_cookie())
        .cookie(Flash::LoggedOut.cookie())
        .finish())
}
