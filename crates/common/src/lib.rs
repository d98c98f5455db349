pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn welcome_names_the_api() {
        assert!(types::Message::welcome().message.contains("Service Nexus"));
    }
}
