use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use petshelter_common::Location;
use petshelter_shelters::{rank_by_distance, MapState, Shelter, ShelterListState};

use crate::{ClosestOpts, Context, Status};

/// Find the closest shelter from `--from`, the configured home or Madrid.
///
#[tracing::instrument(skip(ctx))]
pub fn find_closest_shelter(ctx: &Context, copts: &ClosestOpts) -> Result<String> {
    trace!("closest");

    let origin = copts.from.unwrap_or(ctx.home);
    info!("looking around {origin}");

    let state = MapState::new(ctx.repo.clone());
    state.load();
    let shelters = match state.list_state() {
        ShelterListState::Success(list) => list,
        ShelterListState::Error(e) => return Err(Status::NoShelters(e).into()),
        ShelterListState::Loading => return Err(Status::NoShelters("still loading".into()).into()),
    };

    // We were given a position so act as if the user allowed it.
    //
    state.on_permission_result(true, Some(origin));

    if copts.all {
        return Ok(ranking(&origin, &shelters));
    }

    match state.on_closest_shelter_clicked() {
        Some(closest) => Ok(describe(&origin, &closest)),
        None => Ok(format!("No shelter in range of {origin}")),
    }
}

fn describe(origin: &Location, s: &Shelter) -> String {
    format!(
        "Closest shelter from {origin}: {} ({}) at {:.2} km\n  phone: {}\n  go: {}",
        s.name,
        s.shelter_type,
        origin.distance_to(&s.location()),
        s.dial_uri(),
        s.address.navigation_uri(),
    )
}

fn ranking(origin: &Location, list: &[Shelter]) -> String {
    let ranked = rank_by_distance(origin, list);

    let mut builder = Builder::default();
    builder.push_record(vec!["Id", "Name", "Type", "Distance (km)"]);
    ranked.iter().for_each(|(s, d)| {
        builder.push_record(vec![
            s.id.clone(),
            s.name.clone(),
            s.shelter_type.to_string(),
            format!("{:.2}", d),
        ]);
    });
    let table = builder.build().with(Style::modern()).to_string();
    format!("{} shelter(s) in range of {origin}:\n{table}", ranked.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmds::tests::file_context;

    #[test]
    fn test_closest_from_home() -> Result<()> {
        let ctx = file_context();
        let copts = ClosestOpts {
            from: None,
            all: false,
        };
        let out = find_closest_shelter(&ctx, &copts)?;
        assert!(out.contains("Protectora Centro"), "{out}");
        assert!(out.contains("tel:910000001"));
        Ok(())
    }

    #[test]
    fn test_closest_from_alcala() -> Result<()> {
        let ctx = file_context();
        let copts = ClosestOpts {
            from: Some(Location::new(40.48, -3.37)),
            all: false,
        };
        let out = find_closest_shelter(&ctx, &copts)?;
        assert!(out.contains("Ayuntamiento de Alcala"), "{out}");
        Ok(())
    }

    #[test]
    fn test_closest_nothing_in_range() -> Result<()> {
        let ctx = file_context();
        let copts = ClosestOpts {
            from: Some(Location::new(30.0, -10.0)),
            all: false,
        };
        let out = find_closest_shelter(&ctx, &copts)?;
        assert!(out.starts_with("No shelter in range"), "{out}");
        Ok(())
    }

    #[test]
    fn test_closest_all() -> Result<()> {
        let ctx = file_context();
        let copts = ClosestOpts {
            from: None,
            all: true,
        };
        let out = find_closest_shelter(&ctx, &copts)?;
        assert!(out.starts_with("3 shelter(s) in range"), "{out}");
        assert!(!out.contains("Kiwoko Burgos"));
        let centro = out.find("Protectora Centro").unwrap();
        let sur = out.find("Clinica Veterinaria Sur").unwrap();
        assert!(centro < sur);
        Ok(())
    }
}
