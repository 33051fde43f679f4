use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::LambdaType;

#[derive(Parser, Debug)]
#[command(name = "opcli")]
#[command(author, version, about = "Interactive client for the onpremless control plane")]
pub struct Args {
    /// Control plane base URL (overrides the config file)
    #[arg(long, global = true, env = "OPCLI_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (default: ~/.config/opcli/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (logging disabled if not specified)
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub resource: Resource,
}

#[derive(Subcommand, Debug)]
pub enum Resource {
    /// Manage lambdas
    #[command(subcommand)]
    Lambda(LambdaCommand),
    /// Manage endpoints
    #[command(subcommand)]
    Endpoint(EndpointCommand),
    /// Manage runtimes
    #[command(subcommand)]
    Runtime(RuntimeCommand),
}

#[derive(Subcommand, Debug)]
pub enum LambdaCommand {
    /// Create a lambda from a source directory
    Create(LambdaArgs),
    /// List lambdas
    List,
    /// Start a lambda and wait until it is running
    Start { id: String },
    /// Destroy a lambda and wait until it is gone
    Destroy { id: String },
    /// Create a lambda, then start it
    Deploy(LambdaArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct LambdaArgs {
    /// Source directory or archive
    pub path: Option<String>,

    #[arg(short, long)]
    pub name: Option<String>,

    /// Runtime id
    #[arg(short, long)]
    pub runtime: Option<String>,

    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub lambda_type: Option<TypeArg>,
}

#[derive(Subcommand, Debug)]
pub enum EndpointCommand {
    /// Create an endpoint in front of a lambda
    Create(EndpointArgs),
    /// List endpoints
    List,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// Route path, e.g. /hello
    pub path: Option<String>,

    #[arg(short, long)]
    pub name: Option<String>,

    /// Id of an ENDPOINT lambda
    #[arg(short, long = "lambda-id")]
    pub lambda_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RuntimeCommand {
    /// Create a runtime from a Dockerfile
    Create {
        path: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List runtimes
    List,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArg {
    Endpoint,
    Internal,
}

impl From<TypeArg> for LambdaType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Endpoint => LambdaType::Endpoint,
            TypeArg::Internal => LambdaType::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("opcli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn lambda_create_takes_every_value_up_front() {
        let args = parse(&[
            "lambda", "create", "./fn", "--name", "foo", "--runtime", "py", "--type", "ENDPOINT",
        ]);

        match args.resource {
            Resource::Lambda(LambdaCommand::Create(create)) => {
                assert_eq!(create.path.as_deref(), Some("./fn"));
                assert_eq!(create.name.as_deref(), Some("foo"));
                assert_eq!(create.runtime.as_deref(), Some("py"));
                assert_eq!(create.lambda_type, Some(TypeArg::Endpoint));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let args = parse(&["endpoint", "list", "--api-url", "http://cp:9000"]);

        assert_eq!(args.api_url.as_deref(), Some("http://cp:9000"));
        assert!(matches!(
            args.resource,
            Resource::Endpoint(EndpointCommand::List)
        ));
    }

    #[test]
    fn endpoint_lambda_short_flag() {
        let args = parse(&["endpoint", "create", "/hi", "-n", "api", "-l", "l2"]);

        match args.resource {
            Resource::Endpoint(EndpointCommand::Create(create)) => {
                assert_eq!(create.path.as_deref(), Some("/hi"));
                assert_eq!(create.lambda_id.as_deref(), Some("l2"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn runtime_create_requires_a_path() {
        let result = Args::try_parse_from(["opcli", "runtime", "create"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = Args::try_parse_from(["opcli", "lambda", "create", "-t", "public"]);
        assert!(result.is_err());
    }
}
