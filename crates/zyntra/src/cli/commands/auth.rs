//! Authentication commands

use std::io::{self, Write};

use crate::cli::Context;
use crate::config::StorageScope;
use crate::error::{Result, ZyntraError};
use crate::models::RegisterRequest;

/// Sign in and store the session. `remember` keeps it in the persistent scope.
pub async fn login(ctx: &Context, email: Option<String>, remember: bool) -> Result<()> {
    let settings = ctx.settings()?;
    let store = ctx.store()?;

    let email = match email {
        Some(e) => e,
        None => prompt("Email: ")?,
    };
    let password = prompt_password("Password: ")?;
    if email.is_empty() || password.is_empty() {
        return Err(ZyntraError::invalid_param("Email and password are required"));
    }

    println!("Signing in...");
    let session = ctx.auth_client(&settings)?.login(&email, &password).await?;

    let scope = if remember {
        StorageScope::Local
    } else {
        StorageScope::Session
    };
    // A fresh sign-in replaces whatever either scope held
    store.clear()?;
    store.save(&session, scope)?;

    println!("Welcome back, {}!", session.user_data.display_name());
    println!("Profile: {}", store.profile());
    if session.is_admin() {
        println!("Role:    admin");
    }
    Ok(())
}

pub async fn register(
    ctx: &Context,
    email: String,
    username: String,
    full_name: String,
    admin_id: Option<i64>,
) -> Result<()> {
    let settings = ctx.settings()?;

    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(ZyntraError::invalid_param("Passwords do not match"));
    }
    if password.is_empty() {
        return Err(ZyntraError::invalid_param("Password is required"));
    }

    let mut request = RegisterRequest::new(email, username, full_name, password);
    if let Some(id) = admin_id {
        request = request.with_admin(id);
    }

    let created = ctx.auth_client(&settings)?.register(&request).await?;

    if ctx.is_json() {
        return crate::cli::print_json(&created);
    }
    println!("Account created successfully! Please sign in with 'zyntra auth login'.");
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    if !store.has_credentials() {
        println!("Not logged in.");
        return Ok(());
    }

    store.clear()?;
    println!("Successfully logged out.");
    Ok(())
}

pub async fn status(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    let Some(session) = store.load()? else {
        println!("Status: Not logged in");
        println!("Run 'zyntra auth login' to authenticate.");
        return Ok(());
    };

    println!("Status:  Logged in");
    println!("Profile: {}", store.profile());
    println!("User:    {}", session.user_data.display_name());
    if !session.user_data.email.is_empty() {
        println!("Email:   {}", session.user_data.email);
    }
    println!("Type:    {}", session.user_type);
    match store.active_scope() {
        Some(StorageScope::Local) => println!("Stored:  remembered"),
        Some(StorageScope::Session) => println!("Stored:  until logout"),
        None => {}
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a password without echoing
fn prompt_password(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    Ok(password)
}
