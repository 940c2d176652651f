use anyhow::Result;

use lms_portal::pages::signin::{SignInForm, SignInPage, sign_out};

use super::{App, finish};

pub async fn signin(app: &App, email: &str, password: &str) -> Result<()> {
    let Some(page) = SignInPage::mount(app.page(), &app.store) else {
        if let Some(user) = &app.session.user {
            println!("Already signed in as {} <{}>.", user.name, user.email);
        }
        return Ok(());
    };

    let form = SignInForm {
        email: email.to_string(),
        password: password.to_string(),
    };
    finish(page.submit(&form).await, "Signed in.")
}

pub async fn signout(app: &App) -> Result<()> {
    sign_out(&app.store, &app.nav).await?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let ctx = &app.session;
    if !ctx.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    match &ctx.user {
        Some(user) => {
            println!("Name:  {}", user.name);
            println!("Email: {}", user.email);
            println!("Role:  {}", user.role);
        }
        None => {
            if let Some(role) = &ctx.role {
                println!("Role:  {}", role);
            }
        }
    }
    if let Some(home) = ctx.home_path() {
        println!("Home:  {}", home);
    }
    Ok(())
}
