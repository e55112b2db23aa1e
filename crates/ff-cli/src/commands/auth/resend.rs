use ff_core::validation::check_email;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthEmailArgs;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

const RESEND_FALLBACK: &str = "Could not resend code. Please try again later.";

#[derive(Serialize)]
struct ResendResponse {
    email: String,
    sent: bool,
    message: String,
}

pub async fn handle(
    args: &AuthEmailArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let email = args.email.trim();
    if let Some(issue) = check_email(email) {
        anyhow::bail!("email: {issue}");
    }

    let spinner = Progress::spinner("Sending a new code...");
    let resp = match ctx.client.resend_code(email).await {
        Ok(resp) => {
            spinner.finish_clear();
            resp
        }
        Err(error) => {
            spinner.finish_err("resend failed");
            return Err(client_error(error, RESEND_FALLBACK));
        }
    };

    output(
        &ResendResponse {
            email: email.to_string(),
            sent: true,
            message: resp
                .message
                .unwrap_or_else(|| String::from("A new verification code has been sent.")),
        },
        flags.format,
    )
}
