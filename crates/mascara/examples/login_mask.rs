//! Example: Login window mask
//!
//! Demonstrates: composite wiring over a mock driver, registry
//! extension, and escape-hatch fields
//!
//! Run with: `cargo run --example login_mask`

use std::sync::Arc;

use mascara::prelude::*;

struct LoginWindow {
    username: TextField,
    password: PasswordField,
    remember: Checkbox,
    submit: Button,
    footer: Locator,
}

impl Mask for LoginWindow {
    const NAME: &'static str = "login-window";

    fn wiring() -> Wiring<Self> {
        Wiring::new()
            .rooted_at(&["login-window"])
            .mask::<TextField>("username")
            .mask::<PasswordField>("password")
            .mask::<Checkbox>("remember")
            .mask_at::<Button>("submit", &["actions", "submit"])
            .locator_at("footer", &["footer"])
            .assemble(|fields| {
                Ok(Self {
                    username: fields.take("username")?,
                    password: fields.take("password")?,
                    remember: fields.take("remember")?,
                    submit: fields.take("submit")?,
                    footer: fields.take_locator("footer")?,
                })
            })
    }
}

#[derive(Debug)]
struct SearchBox {
    locator: Locator,
}

impl SearchBox {
    fn query(&self) -> &Locator {
        &self.locator
    }
}

impl Mask for SearchBox {
    const NAME: &'static str = "search-box";
}

fn main() -> MascaraResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mascara=debug")),
        )
        .init();

    println!("=== Login Window Mask Example ===\n");

    // 1. Stage a fake page on the mock driver
    println!("1. Staging the page...");
    let driver = Arc::new(MockDriver::new());
    let root = Locator::from_path(["login-window"])?;
    let staged_username = driver.stage(&Locator::mask_id("username").within(root.clone()));
    let _ = driver.stage(&Locator::mask_id("password").within(root.clone()));
    let _ = driver.stage(&Locator::mask_id("remember").within(root.clone()));
    let staged_submit =
        driver.stage(&Locator::from_path(["actions", "submit"])?.within(root.clone()));
    staged_submit.set_text("Sign in");
    println!("   4 elements staged under {root}");

    // 2. Resolve the composite with no explicit locator
    println!("\n2. Resolving LoginWindow...");
    let masquer = Masquer::new(Arc::clone(&driver) as Arc<dyn Driver>);
    let login: LoginWindow = masquer.resolve()?;
    println!("   username -> {}", login.username.locator());
    println!("   submit   -> {}", login.submit.locator());
    println!("   footer   -> {}", login.footer);

    // 3. Drive the login flow
    println!("\n3. Driving the login flow...");
    login.username.set_value("admin")?;
    login.password.set_value("admin123")?;
    login.remember.set_checked(true)?;
    println!("   clicking '{}'...", login.submit.caption()?);
    login.submit.click()?;
    println!("   typed value: {:?}", staged_username.snapshot().value);
    println!("   clicks seen: {}", staged_submit.snapshot().clicks);

    // 4. Extend the registry at runtime
    println!("\n4. Registering a custom primitive...");
    masquer.register(|context: MaskContext| SearchBox {
        locator: context.into_parts().0,
    });
    let search: SearchBox = masquer.mask_id("global-search").with()?;
    println!("   search-box -> {}", search.query());

    println!("\n5. Registry contents: {:?}", masquer.registry().names());

    Ok(())
}
