//! Account command implementations

use anyhow::Result;
use nexora_core::{Error, NewAccount, Store, StoreClient};

pub async fn cmd_register(
    store: &StoreClient,
    name: &str,
    email: &str,
    password: &str,
    position: &str,
) -> Result<()> {
    let account = NewAccount {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        position: position.to_string(),
    };

    match store.register(account).await {
        Ok(account) => {
            println!("✅ Account created and signed in as {}", account.name);
            if store.is_offline() {
                println!("   (offline mode: data stays on this machine)");
            }
            Ok(())
        }
        Err(Error::DuplicateEmail) => {
            println!("❌ An account with email {} already exists.", email);
            println!("   Use 'nexora login' to sign in instead.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_login(store: &StoreClient, email: &str, password: &str) -> Result<()> {
    match store.login(email, password).await {
        Ok(account) => {
            println!("✅ Signed in as {} <{}>", account.name, account.email);
            Ok(())
        }
        Err(Error::InvalidCredentials) => {
            println!("❌ Invalid credentials.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_logout(store: &StoreClient) -> Result<()> {
    store.logout().await;
    println!("Signed out.");
    Ok(())
}

pub fn cmd_whoami(store: &StoreClient) -> Result<()> {
    match store.current_session() {
        Some(account) => {
            println!();
            println!("👤 {}", account.name);
            println!("   Email: {}", account.email);
            if !account.position.is_empty() {
                println!("   Position: {}", account.position);
            }
            let mode = if store.is_offline() { "offline" } else { "remote" };
            println!("   Mode: {}", mode);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
