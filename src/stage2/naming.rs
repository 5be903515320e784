/// Convert an underscore separated name into a capitalized one: `user_account` → `UserAccount`
///
/// The first ASCII letter of every run between underscores is upper-cased, the underscores are dropped and any other
/// character passes through unchanged.
pub fn snake_to_pascal(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize = true;
    for c in name.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize && c.is_ascii_alphabetic() {
            result.push(c.to_ascii_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a capitalized name into an underscore separated one: `NickName` → `nick_name`
///
/// An underscore goes before every capital that follows at least one non-underscore character, so `nick_Name` gives
/// `nick__name`. Best effort only, runs of capitals and digits do not survive a round trip.
pub fn pascal_to_snake(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + name.len() / 2);
    let mut seen_real = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && seen_real {
            result.push('_');
        }
        seen_real |= c != '_';
        result.push(c.to_ascii_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_to_pascal_basics() {
        assert_eq!(snake_to_pascal("user_account"), "UserAccount");
        assert_eq!(snake_to_pascal("id"), "Id");
        assert_eq!(snake_to_pascal(""), "");
        assert_eq!(snake_to_pascal("__a__b_"), "AB");
        assert_eq!(snake_to_pascal("already_Pascal"), "AlreadyPascal");
    }

    #[test]
    fn snake_to_pascal_keeps_non_letters() {
        assert_eq!(snake_to_pascal("order_2fa"), "Order2Fa");
        assert_eq!(snake_to_pascal("v1_0"), "V10");
        assert_eq!(snake_to_pascal("prix_€uro"), "Prix€Uro");
    }

    #[test]
    fn pascal_to_snake_basics() {
        assert_eq!(pascal_to_snake("NickName"), "nick_name");
        assert_eq!(pascal_to_snake("Id"), "id");
        assert_eq!(pascal_to_snake(""), "");
        assert_eq!(pascal_to_snake("HTTPCode"), "h_t_t_p_code");
        assert_eq!(pascal_to_snake("_Leading"), "_leading");
    }

    #[test]
    fn pascal_to_snake_underscores_before_capitals() {
        assert_eq!(pascal_to_snake("nick_Name"), "nick__name");
        assert_eq!(pascal_to_snake("a_B_C"), "a__b__c");
        assert_eq!(pascal_to_snake("__Id"), "__id");
        assert_eq!(pascal_to_snake("_x_Y"), "_x__y");
    }

    #[test]
    fn round_trip() {
        for name in &["user_account", "id", "a_b_c", "order_item2_total", "x1_y2", "created_at"] {
            assert_eq!(pascal_to_snake(&snake_to_pascal(name)), *name, "{}", name);
        }
    }
}
