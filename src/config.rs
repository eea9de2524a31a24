use std::ffi::OsString;

use clap::{error::ErrorKind, Parser};

use crate::{
    client::{ClientConfig, Credentials, DEFAULT_USER_AGENT},
    error::Error,
    result::Result,
    source::{TimePeriod, TopQuery, DEFAULT_LIMIT},
};

/// Environment variable holding the client ID.
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";

/// Environment variable holding the client secret.
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// Command line of the `weeklypost` binary.
#[derive(Debug, Parser)]
#[command(version, about = "Print a random image or video from a community's top posts")]
pub struct Cli {
    /// Community to pick from, without the `r/` prefix
    pub community: String,

    /// Ranking window
    #[arg(long, value_enum, default_value_t = TimePeriod::Week)]
    pub period: TimePeriod,

    /// Number of top posts to consider
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// User agent sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the URL without its query string
    #[arg(long)]
    pub strip_query: bool,
}

/// Everything one run needs.
#[derive(Debug)]
pub struct Config {
    /// Application credentials
    pub credentials: Credentials,
    /// What to fetch
    pub query: TopQuery,
    /// Endpoints and user agent
    pub client: ClientConfig,
    /// Whether to trim the query string from the result
    pub strip_query: bool,
}

impl Config {
    /// Loads credentials from the process environment and the rest from `args`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_env<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load(|key| std::env::var(key).ok(), args)
    }

    /// Loads credentials through `lookup`, then parses `args`
    /// (including the program name).
    ///
    /// Help and version requests print and exit the process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] if a credential is absent or
    /// empty, checked before the arguments, and [`Error::InvalidArguments`]
    /// if the arguments do not parse.
    pub fn load<F, I, T>(lookup: F, args: I) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let credentials = credentials(&lookup)?;

        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.exit()
            }
            Err(err) => return Err(Error::InvalidArguments(err.to_string())),
        };

        Ok(Self {
            credentials,
            query: TopQuery::new(cli.community, cli.period, cli.limit),
            client: ClientConfig::with_user_agent(cli.user_agent),
            strip_query: cli.strip_query,
        })
    }
}

fn credentials<F>(lookup: &F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        lookup(key)
            .filter(|value| !value.is_empty())
            .ok_or(Error::MissingConfiguration(key))
    };

    let client_id = required(CLIENT_ID_VAR)?;
    let client_secret = required(CLIENT_SECRET_VAR)?;
    Ok(Credentials::new(client_id, client_secret))
}
