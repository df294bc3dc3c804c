/// Field names as they appear in requests and validation errors.
pub struct ContactFields;

impl ContactFields {
    pub const FIRST_NAME: &'static str = "first_name";
    pub const LAST_NAME: &'static str = "last_name";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
    pub const NOTES: &'static str = "notes";
    pub const DAYS: &'static str = "days";
    pub const QUERY: &'static str = "q";
}
