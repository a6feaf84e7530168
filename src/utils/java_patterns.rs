//! Common patterns for recognizing Java naming styles and well-known types

/// Lombok annotations that generate setters for the annotated class or field
pub const SETTER_GENERATING_ANNOTATIONS: &[&str] = &["Setter", "Data"];

/// Annotations used for framework field injection
pub const FIELD_INJECTION_ANNOTATIONS: &[&str] = &["Autowired", "Inject", "Resource"];

const CONSTANT_TYPES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "boolean", "char", "String", "Byte",
    "Short", "Integer", "Long", "Float", "Double", "Boolean", "Character",
];

/// `java.util.Map<K, V>` -> `Map`
pub fn simple_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name).trim();
    let base = base.trim_end_matches("[]").trim();
    base.rsplit('.').next().unwrap_or(base)
}

/// `org.slf4j.Logger` or `Logger`, plus the common logging facades
pub fn is_logger_type(type_name: &str) -> bool {
    matches!(
        simple_type_name(type_name),
        "Logger" | "Log" | "XLogger" | "FluentLogger"
    )
}

pub fn is_optional_type(type_name: &str) -> bool {
    matches!(
        simple_type_name(type_name),
        "Optional" | "OptionalInt" | "OptionalLong" | "OptionalDouble"
    )
}

pub fn is_date_format_type(type_name: &str) -> bool {
    matches!(simple_type_name(type_name), "SimpleDateFormat" | "DateFormat")
}

/// Primitive, boxed primitive or String, without array dimensions
pub fn is_constant_type(type_name: &str) -> bool {
    !type_name.contains('[') && CONSTANT_TYPES.contains(&simple_type_name(type_name))
}

/// `UserService`, `HttpClient2`
pub fn is_upper_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    // Short acronyms such as `IO` are fine
    if name.len() <= 2 {
        return name.chars().all(|c| c.is_ascii_alphanumeric());
    }
    !name.contains('_') && !is_all_caps(name)
}

/// `findById`, `toString`
pub fn is_lower_camel_case(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `MAX_SIZE`, `DEFAULT_TIMEOUT_MS`
pub fn is_constant_case(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    name.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !name.contains("__")
        && !name.ends_with('_')
}

fn is_all_caps(name: &str) -> bool {
    name.chars().filter(|c| c.is_alphabetic()).count() > 2
        && name
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_ascii_uppercase())
}

/// `java.util.Map` -> `Map`, `@lombok.Data` -> `Data`
pub fn simple_annotation_name(name: &str) -> &str {
    let name = name.trim_start_matches('@');
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name("java.util.Map<String, Integer>"), "Map");
        assert_eq!(simple_type_name("Logger"), "Logger");
        assert_eq!(simple_type_name("String[]"), "String");
        assert_eq!(simple_type_name("java.text.SimpleDateFormat"), "SimpleDateFormat");
    }

    #[test]
    fn test_upper_camel_case() {
        assert!(is_upper_camel_case("UserService"));
        assert!(is_upper_camel_case("HttpClient2"));
        assert!(is_upper_camel_case("A"));
        assert!(is_upper_camel_case("IO"));
        assert!(!is_upper_camel_case("userService"));
        assert!(!is_upper_camel_case("User_Service"));
        assert!(!is_upper_camel_case("USERSERVICE"));
        assert!(!is_upper_camel_case(""));
    }

    #[test]
    fn test_lower_camel_case() {
        assert!(is_lower_camel_case("findById"));
        assert!(is_lower_camel_case("run"));
        assert!(!is_lower_camel_case("FindById"));
        assert!(!is_lower_camel_case("find_by_id"));
        assert!(!is_lower_camel_case(""));
    }

    #[test]
    fn test_constant_case() {
        assert!(is_constant_case("MAX_SIZE"));
        assert!(is_constant_case("TIMEOUT2"));
        assert!(!is_constant_case("maxSize"));
        assert!(!is_constant_case("MAX__SIZE"));
        assert!(!is_constant_case("MAX_"));
    }

    #[test]
    fn test_constant_types() {
        assert!(is_constant_type("int"));
        assert!(is_constant_type("java.lang.String"));
        assert!(!is_constant_type("int[]"));
        assert!(!is_constant_type("List<String>"));
    }

    #[test]
    fn test_well_known_types() {
        assert!(is_logger_type("org.slf4j.Logger"));
        assert!(is_optional_type("Optional<User>"));
        assert!(is_date_format_type("DateFormat"));
        assert!(!is_logger_type("LoggerFactory"));
    }

    #[test]
    fn test_simple_annotation_name() {
        assert_eq!(simple_annotation_name("lombok.Data"), "Data");
        assert_eq!(simple_annotation_name("@Autowired"), "Autowired");
    }
}
