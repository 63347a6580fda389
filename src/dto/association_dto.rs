use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::association::{
    ApplicationEvent, ApplicationPerson, CompanyEvent, CompanyPerson, EventPerson, NewAssociation,
};

/// Declares the associate body, the delete query and the lookup query for
/// one junction. Missing ids deserialize as nil and fail validation.
macro_rules! association_requests {
    (
        $assoc:ty,
        $associate:ident,
        $delete:ident,
        $filter:ident,
        $left:ident,
        $right:ident
    ) => {
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct $associate {
            #[serde(default)]
            pub $left: Uuid,
            #[serde(default)]
            pub $right: Uuid,
            pub created_date: Option<DateTime<Utc>>,
        }

        impl $associate {
            pub fn validate_request(&self) -> Result<()> {
                NewAssociation::<$assoc>::new(self.$left, self.$right, None).validate()
            }

            pub fn to_model(self) -> Result<NewAssociation<$assoc>> {
                let link = NewAssociation::new(self.$left, self.$right, self.created_date);
                link.validate()?;
                Ok(link)
            }
        }

        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct $delete {
            #[serde(default)]
            pub $left: Uuid,
            #[serde(default)]
            pub $right: Uuid,
        }

        impl $delete {
            pub fn validate_request(&self) -> Result<()> {
                NewAssociation::<$assoc>::new(self.$left, self.$right, None).validate()
            }

            pub fn to_model(self) -> Result<(Uuid, Uuid)> {
                self.validate_request()?;
                Ok((self.$left, self.$right))
            }
        }

        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct $filter {
            pub $left: Option<Uuid>,
            pub $right: Option<Uuid>,
        }

        impl $filter {
            pub fn is_empty(&self) -> bool {
                self.$left.is_none() && self.$right.is_none()
            }

            pub fn ids(&self) -> (Option<Uuid>, Option<Uuid>) {
                (self.$left, self.$right)
            }
        }
    };
}

association_requests!(
    CompanyPerson,
    AssociateCompanyPersonRequest,
    DeleteCompanyPersonRequest,
    CompanyPersonFilter,
    company_id,
    person_id
);

association_requests!(
    CompanyEvent,
    AssociateCompanyEventRequest,
    DeleteCompanyEventRequest,
    CompanyEventFilter,
    company_id,
    event_id
);

association_requests!(
    ApplicationPerson,
    AssociateApplicationPersonRequest,
    DeleteApplicationPersonRequest,
    ApplicationPersonFilter,
    application_id,
    person_id
);

association_requests!(
    ApplicationEvent,
    AssociateApplicationEventRequest,
    DeleteApplicationEventRequest,
    ApplicationEventFilter,
    application_id,
    event_id
);

association_requests!(
    EventPerson,
    AssociateEventPersonRequest,
    DeleteEventPersonRequest,
    EventPersonFilter,
    event_id,
    person_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn associate_reports_left_id_first() {
        let req = AssociateApplicationEventRequest::default();
        assert_eq!(
            req.validate_request().unwrap_err(),
            Error::validation_field("application_id", "must be a non-nil UUID")
        );
    }

    #[test]
    fn delete_requires_both_ids() {
        let req = DeleteEventPersonRequest {
            event_id: Uuid::new_v4(),
            person_id: Uuid::nil(),
        };
        assert_eq!(
            req.to_model().unwrap_err(),
            Error::validation_field("person_id", "must be a non-nil UUID")
        );
    }

    #[test]
    fn associate_body_uses_junction_field_names() {
        let company_id = Uuid::new_v4();
        let person_id = Uuid::new_v4();
        let req: AssociateCompanyPersonRequest = serde_json::from_value(serde_json::json!({
            "company_id": company_id,
            "person_id": person_id,
        }))
        .unwrap();
        let link = req.to_model().unwrap();
        assert_eq!((link.left_id, link.right_id), (company_id, person_id));
        assert_eq!(link.created_date, None);
    }
}
