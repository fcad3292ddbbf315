use std::{error::Error, path::Path};

use tracing_subscriber::EnvFilter;

use svckit::{
    cli::{Cli, Commands, parse_args},
    descriptor::ServiceDescriptor,
    service::{Program, ProgramFn, ServiceManager, new_service_manager},
    systemd::Systemd,
    unit,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();
    init_logging(&args);

    match args.command {
        Commands::Install { config } => build_manager(&config)?.install()?,
        Commands::Uninstall { config } => build_manager(&config)?.uninstall()?,
        Commands::Start { config } => build_manager(&config)?.start()?,
        Commands::Stop { config } => build_manager(&config)?.stop()?,
        Commands::Restart { config } => build_manager(&config)?.restart()?,
        Commands::Status { config, json } => {
            let manager = build_manager(&config)?;
            let status = manager.status()?;
            if json {
                let report = serde_json::json!({
                    "name": manager.descriptor().name,
                    "status": status,
                });
                println!("{report}");
            } else {
                println!("{}", status.as_ref());
            }
        }
        Commands::Render { config, socket } => {
            let descriptor = ServiceDescriptor::from_file(Path::new(&config))?;
            let executable = descriptor.executable_path()?;
            print!("{}", unit::service_unit(&descriptor, &executable));
            if socket {
                let Some(activation) = &descriptor.socket else {
                    return Err(format!(
                        "service '{}' defines no socket activation",
                        descriptor.name
                    )
                    .into());
                };
                print!("\n{}", unit::socket_unit(activation));
            }
        }
    }

    Ok(())
}

/// Loads the definition file and selects the host's service manager.
fn build_manager(config: &str) -> Result<Systemd<impl Program>, Box<dyn Error>> {
    let descriptor = ServiceDescriptor::from_file(Path::new(config))?;
    let program = ProgramFn::new(|| Ok(()), || Ok(()));
    Ok(new_service_manager(program, descriptor)?)
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
