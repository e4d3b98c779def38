use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use medinest_core::session::{User, UserType};

use super::Context;
use super::utils::{Attribute, print_state, user_from_attributes};

pub fn login(context: &Context, user: User, user_type: UserType) -> Result<()> {
    let mut portal = context.open_portal()?;
    portal.login(user, user_type).context("Login failed")?;

    println!("{}", "Signed in".green());
    print_state(&portal);
    Ok(())
}

pub fn logout(context: &Context) -> Result<()> {
    let mut portal = context.open_portal()?;
    let was_signed_in = portal.is_authenticated();
    portal.logout().context("Logout failed")?;

    if was_signed_in {
        println!("{}", "Signed out".green());
    } else {
        println!("{}", "No session to sign out of".dimmed());
    }
    Ok(())
}

pub fn update(context: &Context, attributes: Vec<Attribute>) -> Result<()> {
    let mut portal = context.open_portal()?;
    if !portal.is_authenticated() {
        bail!("Not signed in; run `medinest login` first");
    }

    portal
        .update_user(user_from_attributes(attributes))
        .context("Profile update failed")?;

    println!("{}", "Profile updated".green());
    print_state(&portal);
    Ok(())
}
