/*
[INPUT]:  Credentials prompted from the terminal
[OUTPUT]: Persisted or cleared session, profile output
[POS]:    CLI account commands (register/login/logout/whoami)
[UPDATE]: When authentication flows change
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use std::process::ExitCode;

use trackit_board::SessionContext;
use trackit_client::{AuthManager, User};

pub async fn register(auth: &AuthManager) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Create account").bold());

    let name: String = Input::with_theme(&theme).with_prompt("Name").interact_text()?;
    let email: String = Input::with_theme(&theme).with_prompt("Email").interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let user = auth
        .register(name.trim(), email.trim(), &password)
        .await
        .context("register")?;
    print_signed_in(&user);
    Ok(ExitCode::SUCCESS)
}

pub async fn login(auth: &AuthManager) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    let email: String = Input::with_theme(&theme).with_prompt("Email").interact_text()?;
    let password = Password::with_theme(&theme).with_prompt("Password").interact()?;

    let user = auth.login(email.trim(), &password).await.context("login")?;
    print_signed_in(&user);
    Ok(ExitCode::SUCCESS)
}

pub async fn logout(auth: &AuthManager) -> Result<ExitCode> {
    if auth.restore().is_none() {
        println!("{}", style("Not signed in.").yellow());
        return Ok(ExitCode::SUCCESS);
    }
    auth.logout().await.context("logout")?;
    println!("{}", style("Signed out.").green());
    Ok(ExitCode::SUCCESS)
}

pub async fn whoami(auth: &AuthManager) -> Result<ExitCode> {
    match SessionContext::resolve(auth).await {
        SessionContext::Authenticated(user) => {
            println!("{} <{}>", style(&user.name).bold(), user.email);
            println!("{} {}", style("id:").dim(), user.id);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            println!("{}", style("Not signed in.").yellow());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_signed_in(user: &User) {
    println!(
        "{} {} <{}>",
        style("Signed in as").green(),
        style(&user.name).bold(),
        user.email
    );
}
