use ff_core::Route;
use ff_core::validation::SignupForm;
use serde::Serialize;

use super::prompt_and_confirm;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthSignupArgs;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::prompt::Prompt;

const SIGNUP_FALLBACK: &str = "Signup failed. Please try again later.";

#[derive(Serialize)]
struct SignupResponse {
    username: String,
    email: String,
    verified: bool,
    message: Option<String>,
    next: String,
}

pub async fn handle(
    args: &AuthSignupArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.enter(Route::Signup)?;

    let mut prompt = Prompt::stdin();
    let password = prompt.required("Password: ").await?;
    let confirm_password = prompt.required("Confirm password: ").await?;
    SignupForm {
        username: &args.username,
        email: &args.email,
        password: &password,
        confirm_password: &confirm_password,
    }
    .validate()?;

    let spinner = Progress::spinner("Creating account...");
    let resp = match ctx
        .client
        .signup(args.username.trim(), args.email.trim(), &password)
        .await
    {
        Ok(resp) => {
            spinner.finish_clear();
            resp
        }
        Err(error) => {
            spinner.finish_err("signup failed");
            return Err(client_error(error, SIGNUP_FALLBACK));
        }
    };
    tracing::info!(email = %args.email, "account created");
    eprintln!("Account created! Check your email for a confirmation code.");

    let verified = prompt_and_confirm(ctx, &mut prompt, args.email.trim()).await?;

    output(
        &SignupResponse {
            username: args.username.trim().to_string(),
            email: args.email.trim().to_string(),
            verified,
            message: resp.message,
            next: Route::Login.to_string(),
        },
        flags.format,
    )
}
