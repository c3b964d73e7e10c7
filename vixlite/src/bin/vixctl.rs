//! Demo driver for the vixlite bindings.
//!
//! Connects to the local hypervisor, opens a VM and runs one operation per
//! invocation. Guest operations take credentials via `--user`/`--password`.
//! `RUST_LOG` controls verbosity.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vixlite::{CloneType, Host, ServiceProvider, VariableScope};

#[derive(Parser)]
#[command(name = "vixctl", about = "Drive a VMware VM through the VIX API")]
struct Cli {
    /// Path to the .vmx file of the target VM.
    #[arg(long, global = true)]
    vmx: Option<String>,

    /// Hypervisor product to connect to.
    #[arg(long, default_value = "workstation", global = true)]
    provider: String,

    /// Guest username for guest operations.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Guest password for guest operations.
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print name, power state, tools state and basic properties.
    Info,
    /// List VMs currently running on the host.
    Running,
    /// Power the VM on.
    On {
        #[arg(long)]
        gui: bool,
    },
    /// Power the VM off.
    Off {
        #[arg(long)]
        from_guest: bool,
    },
    /// Reset the VM.
    Reset {
        #[arg(long)]
        from_guest: bool,
    },
    /// Suspend the VM.
    Suspend,
    /// Wait until the guest tools are up.
    WaitTools {
        /// Give up after this many seconds (0 waits without bound).
        #[arg(long, default_value_t = 0)]
        timeout: u64,
    },
    /// List processes running in the guest.
    Ps,
    /// Run a program in the guest and report its exit code.
    Run {
        program: String,
        #[arg(default_value = "")]
        args: String,
    },
    /// Copy a file from the host into the guest.
    CopyTo { src: String, dest: String },
    /// Copy a file from the guest to the host.
    CopyFrom { src: String, dest: String },
    /// List a directory in the guest.
    Ls { path: String },
    /// Read a guest variable.
    ReadVar { name: String },
    /// Write a guest variable.
    WriteVar { name: String, value: String },
    /// Save a PNG screenshot of the console.
    Screenshot { output: String },
    /// Snapshot operations.
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommand,
    },
    /// Clone the VM to a new .vmx path.
    Clone {
        dest: String,
        #[arg(long)]
        linked: bool,
    },
}

#[derive(Subcommand)]
enum SnapshotCommand {
    /// List root snapshots.
    List,
    /// Create a snapshot.
    Create {
        name: String,
        #[arg(default_value = "")]
        description: String,
        #[arg(long)]
        no_memory: bool,
    },
    /// Revert to a named snapshot.
    Revert {
        name: String,
        #[arg(long)]
        gui: bool,
    },
    /// Remove a named snapshot.
    Remove {
        name: String,
        #[arg(long)]
        children: bool,
    },
}

fn provider_from_name(name: &str) -> Result<ServiceProvider> {
    match name {
        "default" => Ok(ServiceProvider::Default),
        "server" => Ok(ServiceProvider::Server),
        "workstation" => Ok(ServiceProvider::Workstation),
        "player" => Ok(ServiceProvider::Player),
        "vi-server" => Ok(ServiceProvider::ViServer),
        other => anyhow::bail!("unknown provider {other:?}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let host = Host::connect(provider_from_name(&cli.provider)?)?;

    if let Command::Running = cli.command {
        for location in host.running_vms()? {
            println!("{location}");
        }
        return Ok(());
    }

    let vmx = cli.vmx.as_deref().context("--vmx is required")?;
    let vm = host.open(vmx)?;

    match &cli.command {
        Command::Running => unreachable!(),
        Command::Info => {
            println!("name:        {}", vm.name()?);
            println!("guest os:    {}", vm.guest_os()?);
            println!("vmx:         {}", vm.vmx_path()?);
            println!("cpus:        {}", vm.cpu_count()?);
            println!("memory:      {} MB", vm.memory_size()?);
            println!("power state: {}", vm.power_state()?);
            println!("tools:       {:?}", vm.tools_state()?);
        }
        Command::On { gui } => vm.power_on(*gui)?,
        Command::Off { from_guest } => vm.power_off(*from_guest)?,
        Command::Reset { from_guest } => vm.reset(*from_guest)?,
        Command::Suspend => vm.suspend()?,
        Command::WaitTools { timeout } => {
            let timeout = (*timeout > 0).then(|| std::time::Duration::from_secs(*timeout));
            vm.wait_for_tools(timeout)?;
        }
        Command::Ps => {
            login(&cli, &vm)?;
            for process in vm.list_processes()? {
                println!(
                    "{:>8}  {:<12} {:<20} {}",
                    process.pid, process.owner, process.name, process.command
                );
            }
        }
        Command::Run { program, args } => {
            login(&cli, &vm)?;
            let result = vm.run_program(program, args, true, false)?;
            println!("pid {} exited with {}", result.pid, result.exit_code);
        }
        Command::CopyTo { src, dest } => {
            login(&cli, &vm)?;
            vm.copy_file_to_guest(src, dest)?;
        }
        Command::CopyFrom { src, dest } => {
            login(&cli, &vm)?;
            vm.copy_file_from_guest(src, dest)?;
        }
        Command::Ls { path } => {
            login(&cli, &vm)?;
            for entry in vm.list_directory(path)? {
                let marker = if entry.is_directory() { "/" } else { "" };
                println!("{}{marker}", entry.name);
            }
        }
        Command::ReadVar { name } => {
            println!("{}", vm.read_variable(VariableScope::Guest, name)?)
        }
        Command::WriteVar { name, value } => {
            vm.write_variable(VariableScope::Guest, name, value)?
        }
        Command::Screenshot { output } => {
            let image = vm.capture_screen_image()?;
            std::fs::write(output, image).with_context(|| format!("writing {output}"))?;
        }
        Command::Snapshot { command } => match command {
            SnapshotCommand::List => {
                for index in 0..vm.num_root_snapshots()? {
                    let snapshot = vm.root_snapshot(index)?;
                    println!("{}: {}", snapshot.display_name()?, snapshot.description()?);
                }
            }
            SnapshotCommand::Create {
                name,
                description,
                no_memory,
            } => {
                vm.create_snapshot(name, description, !*no_memory)?;
            }
            SnapshotCommand::Revert { name, gui } => {
                let snapshot = vm.named_snapshot(name)?;
                vm.revert_to_snapshot(&snapshot, *gui)?;
            }
            SnapshotCommand::Remove { name, children } => {
                let snapshot = vm.named_snapshot(name)?;
                vm.remove_snapshot(&snapshot, *children)?;
            }
        },
        Command::Clone { dest, linked } => {
            let clone_type = if *linked {
                CloneType::Linked
            } else {
                CloneType::Full
            };
            vm.clone_to(dest, None, clone_type)?;
        }
    }

    Ok(())
}

fn login(cli: &Cli, vm: &vixlite::Vm) -> Result<()> {
    let user = cli.user.as_deref().context("--user is required")?;
    let password = cli.password.as_deref().context("--password is required")?;
    vm.login(user, password, false)?;
    Ok(())
}
