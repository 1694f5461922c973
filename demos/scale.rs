use std::io::Read;

use hanspoon::{AmountDisplay, Recipe, ScalingSession};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    let bin = args.next().unwrap_or_else(|| "scale".into());
    let in_file = match args.next() {
        Some(path) => path,
        None => anyhow::bail!("Usage: {bin} [<recipe.json>|STDIN] [servings] [<id>=<amount>]"),
    };
    let servings = args.next().map(|s| s.parse::<f64>()).transpose()?;
    let edit = args.next();

    let input = match in_file.as_ref() {
        "STDIN" => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
        path => std::fs::read_to_string(path)?,
    };

    let recipe = Recipe::from_json(&input)?;
    let mut session = ScalingSession::new(recipe);
    if let Some(servings) = servings {
        session.set_servings(servings);
    }
    if let Some(edit) = edit {
        let Some((id, value)) = edit.split_once('=') else {
            anyhow::bail!("amount edit must be id=value, got '{edit}'");
        };
        let resolution = session.edit_ingredient_amount(&id.into(), value);
        println!("edit {id}={value}: {resolution:?}");
    }

    let view = session.view();
    println!(
        "{} ({} servings)",
        session.recipe().name,
        view.target_servings
    );
    for group in &view.groups {
        if !group.group_name.is_empty() {
            println!("\n[{}]", group.group_name);
        }
        for i in &group.ingredients {
            match &i.display {
                AmountDisplay::Blank => println!("  {}", i.name),
                display => println!("  {} {}{}", i.name, display, i.unit),
            }
        }
    }
    println!();
    for (n, step) in view.instructions.iter().enumerate() {
        println!("{}. {step}", n + 1);
    }
    Ok(())
}
