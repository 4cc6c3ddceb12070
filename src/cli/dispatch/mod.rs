use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        users_file: matches.get_one::<PathBuf>("users-file").cloned(),
    };

    let admin_password = matches
        .get_one::<String>("admin-password")
        .map(|s| SecretString::from(s.as_str()))
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --admin-password"))?;

    Ok((action, GlobalArgs::new(admin_password)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn test_handler_defaults() {
        let matches = commands::new().get_matches_from(vec!["aula"]);
        let (action, globals) = handler(&matches).unwrap();

        let Action::Server { port, users_file } = action;
        assert_eq!(port, 8080);
        assert!(users_file.is_none());
        assert_eq!(globals.admin_password.expose_secret(), "Admin@123");
    }

    #[test]
    fn test_handler_users_file() {
        let matches =
            commands::new().get_matches_from(vec!["aula", "--users-file", "/tmp/users.json"]);
        let (action, _) = handler(&matches).unwrap();

        let Action::Server { users_file, .. } = action;
        assert_eq!(users_file, Some(PathBuf::from("/tmp/users.json")));
    }
}
