use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub admin_password: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(admin_password: SecretString) -> Self {
        Self { admin_password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("Admin@123"));
        assert_eq!(args.admin_password.expose_secret(), "Admin@123");
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let args = GlobalArgs::new(SecretString::from("Admin@123"));
        assert!(!format!("{args:?}").contains("Admin@123"));
    }
}
