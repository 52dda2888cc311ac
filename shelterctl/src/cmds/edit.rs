use eyre::Result;
use tracing::trace;

use petshelter_shelters::{DetailState, Shelter};

use crate::{Context, EditOpts};

/// Display one shelter with the ways to contact/reach it.
///
#[tracing::instrument(skip(ctx))]
pub fn show_shelter(ctx: &Context, id: &str) -> Result<String> {
    let detail = DetailState::new(ctx.repo.clone());
    detail.load(id)?;
    let s = detail.shelter();
    Ok(format!(
        "{}\n  call: {}\n  go: {}",
        serde_json::to_string_pretty(&s)?,
        s.dial_uri(),
        s.address.navigation_uri()
    ))
}

/// Apply the requested changes to a copy of the shelter.  Nothing is sent back to the API.
///
#[tracing::instrument(skip(ctx))]
pub fn edit_shelter(ctx: &Context, eopts: &EditOpts) -> Result<Shelter> {
    trace!("edit {}", eopts.id);

    let detail = DetailState::new(ctx.repo.clone());
    detail.load(&eopts.id)?;

    if let Some(name) = &eopts.name {
        detail.update_name(name);
    }
    if let Some(phone) = &eopts.phone {
        detail.update_phone(phone);
    }
    if let Some(t) = eopts.shelter_type {
        detail.update_shelter_type(t);
    }
    if let (Some(lat), Some(lon)) = (&eopts.lat, &eopts.lon) {
        detail.update_address(lat, lon)?;
    }
    Ok(detail.shelter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmds::tests::file_context;
    use petshelter_shelters::{Address, Repository, ShelterType};

    fn opts(id: &str) -> EditOpts {
        EditOpts {
            name: None,
            phone: None,
            shelter_type: None,
            lat: None,
            lon: None,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_show() -> Result<()> {
        let ctx = file_context();
        let out = show_shelter(&ctx, "3")?;
        assert!(out.contains("\"name\": \"Clinica Veterinaria Sur\""));
        assert!(out.contains("call: tel:910000003"));
        assert!(out.contains("go: google.navigation:q=40.3,-3.72&mode=w"));
        Ok(())
    }

    #[test]
    fn test_show_unknown() {
        let ctx = file_context();
        assert!(show_shelter(&ctx, "42").is_err());
    }

    #[test]
    fn test_edit_nothing() -> Result<()> {
        let ctx = file_context();
        let s = edit_shelter(&ctx, &opts("1"))?;
        assert_eq!(ctx.repo.get_shelter("1")?, s);
        Ok(())
    }

    #[test]
    fn test_edit_everything() -> Result<()> {
        let ctx = file_context();
        let eopts = EditOpts {
            name: Some("Protectora Sol".to_string()),
            phone: Some("911111111".to_string()),
            shelter_type: Some(ShelterType::Veterinary),
            lat: Some("40.4169".to_string()),
            lon: Some("-3.7035".to_string()),
            ..opts("1")
        };
        let s = edit_shelter(&ctx, &eopts)?;
        assert_eq!("1", s.id);
        assert_eq!("Protectora Sol", s.name);
        assert_eq!("911111111", s.phone_number);
        assert_eq!(ShelterType::Veterinary, s.shelter_type);
        assert_eq!(Address::new(40.4169, -3.7035), s.address);
        Ok(())
    }

    #[test]
    fn test_edit_bad_lat() {
        let ctx = file_context();
        let eopts = EditOpts {
            lat: Some("forty".to_string()),
            lon: Some("-3.7".to_string()),
            ..opts("1")
        };
        assert!(edit_shelter(&ctx, &eopts).is_err());
    }
}
