#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::NaiveDate;
    use contacts_sdk::{Contact, ContactPatch, NewContact, PageRequest};

    #[test]
    fn test_contact_to_dto_serializes_date_as_iso() {
        let contact = Contact {
            id: 3,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: None,
            birthday: NaiveDate::from_ymd_opt(1815, 12, 10),
            notes: None,
        };

        let dto: dto::ContactDto = contact.into();
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["birthday"], "1815-12-10");
        assert!(json["phone"].is_null());
        assert!(json["notes"].is_null());
    }

    #[test]
    fn test_create_request_optional_fields_default_to_none() {
        let req: dto::CreateContactReq = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com"}"#,
        )
        .unwrap();

        let new_contact: NewContact = req.into();
        assert_eq!(new_contact.first_name, "Ada");
        assert_eq!(new_contact.phone, None);
        assert_eq!(new_contact.birthday, None);
        assert_eq!(new_contact.notes, None);
    }

    #[test]
    fn test_create_request_requires_email() {
        let res = serde_json::from_str::<dto::CreateContactReq>(
            r#"{"first_name":"Ada","last_name":"Lovelace"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: dto::UpdateContactReq =
            serde_json::from_str(r#"{"phone":null,"birthday":"1990-02-28"}"#).unwrap();

        let patch: ContactPatch = req.into();
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.birthday, Some(NaiveDate::from_ymd_opt(1990, 2, 28)));
        assert_eq!(patch.notes, None);
        assert_eq!(patch.first_name, None);
    }

    #[test]
    fn test_update_request_empty_object_is_empty_patch() {
        let req: dto::UpdateContactReq = serde_json::from_str("{}").unwrap();
        let patch: ContactPatch = req.into();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_request_rejects_malformed_date() {
        let res = serde_json::from_str::<dto::UpdateContactReq>(r#"{"birthday":"28/02/1990"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_page_query_passes_through_non_negative_values() {
        let page: PageRequest = dto::PageQuery {
            skip: Some(5),
            limit: None,
        }
        .into();
        assert_eq!(
            page,
            PageRequest {
                skip: Some(5),
                limit: None
            }
        );
    }

    #[test]
    fn test_negative_page_query_becomes_empty_window() {
        for (skip, limit) in [(Some(-1), None), (None, Some(-3))] {
            let page: PageRequest = dto::PageQuery { skip, limit }.into();
            assert_eq!(page, PageRequest::new(0, 0));
        }
    }
}
