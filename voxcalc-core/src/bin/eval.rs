use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxcalc_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let expr = env::args().skip(1).collect::<Vec<_>>().join(" ");
    println!("Expression: {}", expr);

    match voxcalc_core::evaluator::evaluate(&expr) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => {
            let err: anyhow::Error = err.into();
            eprintln!("{:#}", err);
        }
    }
}
