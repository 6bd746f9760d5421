/// Human message used when an error arrives without one.
pub fn status_message(code: u16) -> &'static str {
    match code {
        400 => "Invalid request parameters",
        401 => "Authentication required",
        403 => "Access forbidden",
        404 => "Resource not found",
        409 => "Conflict",
        422 => "Validation error",
        429 => "Rate limit exceeded",
        500 => "Internal server error",
        502 => "Service temporarily unavailable",
        503 => "Service unavailable",
        _ => "Unexpected error",
    }
}

#[cfg(test)]
mod tests {
    use super::status_message;

    #[test]
    fn known_and_unknown_codes() {
        assert_eq!(status_message(429), "Rate limit exceeded");
        assert_eq!(status_message(502), "Service temporarily unavailable");
        assert_eq!(status_message(418), "Unexpected error");
    }
}
