use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account and confirm it with the emailed code.
    Signup(AuthSignupArgs),
    /// Log in and store the session.
    Login(AuthLoginArgs),
    /// Confirm an email address with a 6-digit code.
    Verify(AuthVerifyArgs),
    /// Send a new verification code.
    Resend(AuthEmailArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
    /// Reload your profile from the server.
    Refresh,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    /// Display name (at least 3 characters).
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthVerifyArgs {
    #[arg(long)]
    pub email: String,
    /// The 6-digit code from the verification email.
    #[arg(long)]
    pub code: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthEmailArgs {
    #[arg(long)]
    pub email: String,
}
