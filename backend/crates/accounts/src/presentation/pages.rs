//! Page Handlers (HTML surface)
//!
//! Server-rendered login/register/account pages using session-cookie auth.
//! Markup is intentionally bare; there is no template engine.

use axum::Form;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use kernel::principal::CurrentUser;
use platform::cookie::CookieConfig;
use platform::html;
use platform::media::Upload;

use crate::application::config::AccountsConfig;
use crate::application::{
    EditProfileInput, EditProfileUseCase, LoadAccountUseCase, RegisterInput, RegisterUseCase,
    ResetPhotoUseCase, SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::error::{AccountsError, AccountsResult};
use crate::presentation::dto::{LoginForm, RegisterForm};
use crate::presentation::handlers::AccountsAppState;

use crate::domain::repository::{
    AccountRepository, CredentialRepository, ProfileRepository, SessionRepository, UserRepository,
};

/// Trait alias shorthand for the full repository bound used by page handlers
pub trait PageRepo:
    UserRepository
    + AccountRepository
    + CredentialRepository
    + SessionRepository
    + ProfileRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> PageRepo for T where
    T: UserRepository
        + AccountRepository
        + CredentialRepository
        + SessionRepository
        + ProfileRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

fn session_cookie(config: &AccountsConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl.as_secs() as i64),
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

fn login_page(error: Option<&str>, username: &str) -> Html<String> {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>", html::escape(e)))
        .unwrap_or_default();

    Html(html::page(
        "Log in",
        &format!(
            concat!(
                "<h1>Log in</h1>{}",
                "<form method=\"post\" action=\"/login/\">",
                "<input name=\"username\" placeholder=\"Username\" value=\"{}\">",
                "<input type=\"password\" name=\"password\" placeholder=\"Password\">",
                "<button type=\"submit\">Log in</button>",
                "</form>",
                "<a href=\"/register/\">Register</a>"
            ),
            error_html,
            html::escape(username)
        ),
    ))
}

/// GET /login/
pub async fn login_form() -> Html<String> {
    login_page(None, "")
}

/// POST /login/
pub async fn login_submit<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    Form(form): Form<LoginForm>,
) -> AccountsResult<Response> {
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case
        .execute(SignInInput {
            user_name: form.username.clone(),
            password: form.password,
        })
        .await
    {
        Ok(output) => {
            let cookie = session_cookie(&state.config).build_set_cookie(&output.session_token);
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to("/account/"),
            )
                .into_response())
        }
        Err(AccountsError::InvalidCredentials) => {
            Ok(login_page(Some("Username or password is invalid"), &form.username)
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /logout/
pub async fn logout<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    if let Some(token) =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = session_cookie(&state.config).build_delete_cookie();
    ([(header::SET_COOKIE, cookie)], Redirect::to("/"))
}

// ============================================================================
// Register
// ============================================================================

fn register_page(error: Option<&str>, form: Option<&RegisterForm>) -> Html<String> {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>", html::escape(e)))
        .unwrap_or_default();

    let (username, email) = form
        .map(|f| (f.username.as_str(), f.email.as_str()))
        .unwrap_or(("", ""));

    Html(html::page(
        "Register",
        &format!(
            concat!(
                "<h1>Register</h1>{}",
                "<form method=\"post\" action=\"/register/\">",
                "<input name=\"username\" placeholder=\"Username\" value=\"{}\">",
                "<input name=\"email\" placeholder=\"Email\" value=\"{}\">",
                "<input type=\"password\" name=\"password1\" placeholder=\"Password\">",
                "<input type=\"password\" name=\"password2\" placeholder=\"Repeat password\">",
                "<button type=\"submit\">Register</button>",
                "</form>",
                "<a href=\"/login/\">Log in</a>"
            ),
            error_html,
            html::escape(username),
            html::escape(email)
        ),
    ))
}

/// GET /register/
pub async fn register_form() -> Html<String> {
    register_page(None, None)
}

/// POST /register/
pub async fn register_submit<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    Form(form): Form<RegisterForm>,
) -> AccountsResult<Response> {
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let result = use_case
        .execute(RegisterInput {
            user_name: form.username.clone(),
            password1: form.password1.clone(),
            password2: form.password2.clone(),
            email: form.email.clone(),
        })
        .await;

    match result {
        Ok(_) => {
            // Log the fresh account in and land on the profile edit page
            let sign_in = SignInUseCase::new(
                state.repo.clone(),
                state.repo.clone(),
                state.repo.clone(),
                state.config.clone(),
            );
            let output = sign_in
                .execute(SignInInput {
                    user_name: form.username,
                    password: form.password1,
                })
                .await?;

            let cookie = session_cookie(&state.config).build_set_cookie(&output.session_token);
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to("/account/edit"),
            )
                .into_response())
        }
        Err(
            e @ (AccountsError::UserNameTaken
            | AccountsError::PasswordMismatch
            | AccountsError::PasswordValidation(_)
            | AccountsError::Validation(_)),
        ) => Ok(register_page(Some(&e.to_string()), Some(&form)).into_response()),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Account editing
// ============================================================================

/// GET /account/edit
pub async fn edit_account_form<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    current_user: CurrentUser,
) -> AccountsResult<Html<String>> {
    let use_case = LoadAccountUseCase::new(state.repo.clone(), state.repo.clone());
    let (user, profile) = use_case.execute(&current_user.user_id).await?;

    let text_input = |name: &str, value: &str| {
        format!(
            "<label>{}: <input name=\"{}\" value=\"{}\"></label><br>",
            html::escape(name),
            name,
            html::escape(value)
        )
    };

    let body = format!(
        concat!(
            "<h1>Edit account</h1>",
            "<form method=\"post\" action=\"/account/edit\" enctype=\"multipart/form-data\">",
            "{}{}{}{}{}{}{}",
            "<label>photo: <input type=\"file\" name=\"photo\"></label><br>",
            "<button type=\"submit\">Save</button>",
            "</form>",
            "<p>Current photo: {}</p>",
            "<a href=\"/account/delete_photo/{}\">Delete photo</a> ",
            "<a href=\"/account/\">Back to account</a>"
        ),
        text_input("username", user.user_name.original()),
        text_input("email", user.email.as_ref().map(|e| e.as_str()).unwrap_or("")),
        text_input("first_name", user.first_name.as_deref().unwrap_or("")),
        text_input("last_name", user.last_name.as_deref().unwrap_or("")),
        text_input("city", profile.city.as_deref().unwrap_or("")),
        text_input("gender", profile.gender.as_deref().unwrap_or("")),
        text_input("emotions", profile.emotions.as_deref().unwrap_or("")),
        html::escape(&profile.photo),
        profile.id,
    );

    Ok(Html(html::page("Edit account", &body)))
}

/// POST /account/edit
pub async fn edit_account_submit<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AccountsResult<Redirect> {
    let mut input = EditProfileInput {
        user_name: None,
        email: None,
        first_name: None,
        last_name: None,
        city: None,
        gender: None,
        emotions: None,
        photo: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AccountsError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "photo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AccountsError::Validation(e.to_string()))?;
            if !file_name.is_empty() && !bytes.is_empty() {
                input.photo = Some(Upload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AccountsError::Validation(e.to_string()))?;

        match name.as_str() {
            "username" => input.user_name = Some(value),
            "email" => input.email = Some(value),
            "first_name" => input.first_name = Some(value),
            "last_name" => input.last_name = Some(value),
            "city" => input.city = Some(value),
            "gender" => input.gender = Some(value),
            "emotions" => input.emotions = Some(value),
            _ => {}
        }
    }

    let use_case = EditProfileUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.media.clone(),
    );
    use_case.execute(&current_user.user_id, input).await?;

    Ok(Redirect::to("/account/"))
}

/// GET /account/delete_photo/{id}
pub async fn delete_photo<R: PageRepo>(
    State(state): State<AccountsAppState<R>>,
    _current_user: CurrentUser,
    Path(profile_id): Path<i64>,
) -> AccountsResult<Redirect> {
    let use_case = ResetPhotoUseCase::new(state.repo.clone(), state.media.clone());
    use_case.execute(profile_id).await?;

    Ok(Redirect::to("/account/edit"))
}
