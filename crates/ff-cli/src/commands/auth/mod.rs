mod login;
mod logout;
mod refresh;
mod resend;
mod signup;
mod status;
mod verify;

use ff_core::validation::check_code;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::commands::client_error;
use crate::context::AppContext;
use crate::progress::Progress;
use crate::prompt::Prompt;

const VERIFY_FALLBACK: &str = "Verification failed. Please try again.";
const VERIFIED: &str = "Email verified successfully!";

/// Handle `ff auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup(args) => signup::handle(args, ctx, flags).await,
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Verify(args) => verify::handle(args, ctx, flags).await,
        AuthCommands::Resend(args) => resend::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
        AuthCommands::Refresh => refresh::handle(ctx, flags).await,
    }
}

/// Check the code locally, then confirm it with the server.
async fn confirm(ctx: &AppContext, email: &str, code: &str) -> anyhow::Result<()> {
    check_code(code)?;
    let spinner = Progress::spinner("Verifying code...");
    match ctx.client.confirm_code(email, code.trim()).await {
        Ok(_) => {
            spinner.finish_clear();
            eprintln!("{VERIFIED}");
            Ok(())
        }
        Err(error) => {
            spinner.finish_err("verification failed");
            Err(client_error(error, VERIFY_FALLBACK))
        }
    }
}

/// Ask for the emailed code and confirm it. An empty answer skips
/// verification and returns `false`.
async fn prompt_and_confirm<R>(
    ctx: &AppContext,
    prompt: &mut Prompt<R>,
    email: &str,
) -> anyhow::Result<bool>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let code = prompt
        .required("Verification code (empty to skip): ")
        .await?;
    if code.trim().is_empty() {
        eprintln!("Skipped. Run `ff auth verify --email {email} --code <CODE>` when you have it.");
        return Ok(false);
    }
    confirm(ctx, email, &code).await?;
    Ok(true)
}
