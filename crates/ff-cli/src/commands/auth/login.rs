use ff_auth::guard::home;
use ff_core::Route;
use ff_core::validation::LoginForm;
use serde::Serialize;

use super::prompt_and_confirm;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::prompt::Prompt;

const LOGIN_FALLBACK: &str = "Login failed. Please try again.";

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    username: Option<String>,
    email: String,
    requires_verification: bool,
    verified: Option<bool>,
    next: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.enter(Route::Login)?;

    let email = args.email.trim();
    let mut prompt = Prompt::stdin();
    let password = prompt.required("Password: ").await?;
    LoginForm {
        email,
        password: &password,
    }
    .validate()?;

    let spinner = Progress::spinner("Logging in...");
    let resp = match ctx.client.login(email, &password).await {
        Ok(resp) => {
            spinner.finish_clear();
            resp
        }
        Err(error) => {
            spinner.finish_err("login failed");
            return Err(client_error(error, LOGIN_FALLBACK));
        }
    };

    if let Some(record) = resp.to_record() {
        ctx.auth.login(record)?;
        tracing::info!(%email, "logged in");
    }

    let verified = if resp.requires_verification {
        eprintln!("Your email address is not verified yet.");
        Some(prompt_and_confirm(ctx, &mut prompt, email).await?)
    } else {
        None
    };

    let state = ctx.auth.state();
    let next = if state.is_logged_in() {
        home(&state)
    } else {
        Route::Login
    };
    output(
        &LoginResponse {
            authenticated: state.is_logged_in(),
            username: ctx.auth.user().and_then(|user| user.username),
            email: email.to_string(),
            requires_verification: resp.requires_verification,
            verified,
            next: next.to_string(),
        },
        flags.format,
    )
}
