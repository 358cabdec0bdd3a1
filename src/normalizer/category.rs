use crate::cabrillo::{ContactRecord, StationHeader};
use crate::callsign;
use crate::config::RuleSet;
use crate::reference::ReferenceData;
use crate::types::{CategoryAssignment, LocationClass, ModeCategory, ModeClass, StationClass};
use std::collections::BTreeSet;

/// Distinct Local codes among sent locations. A county-line location
/// such as `ORLE/JEFF` activates each of its parts.
pub fn local_sent_locations<'c, I>(sent: I, refs: &ReferenceData) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'c str>,
{
    sent.into_iter()
        .flat_map(|loc| loc.split('/'))
        .filter(|code| refs.is_local(code))
        .map(str::to_string)
        .collect()
}

pub fn derive_location_class(
    header: &StationHeader,
    contacts: &[ContactRecord],
    rules: &RuleSet,
    refs: &ReferenceData,
) -> LocationClass {
    if contacts
        .iter()
        .any(|c| callsign::is_foreign(&c.sent.call, rules))
    {
        return LocationClass::Foreign;
    }

    // a state-line location such as TX/AR is Regional through any of its parts
    if contacts
        .iter()
        .any(|c| c.sent.location.split('/').any(|p| refs.is_regional(p)))
    {
        return LocationClass::Regional;
    }

    match header.station {
        Some(s) if s.is_fixed_type() => LocationClass::LocalFixed,
        Some(StationClass::Mobile | StationClass::Rover) => LocationClass::LocalRover,
        _ => {
            let activated =
                local_sent_locations(contacts.iter().map(|c| c.sent.location.as_str()), refs);
            if activated.len() > 1 {
                LocationClass::LocalRover
            } else {
                LocationClass::LocalFixed
            }
        }
    }
}

pub fn derive_mode_category<I>(classes: I) -> ModeCategory
where
    I: IntoIterator<Item = ModeClass>,
{
    let (mut phone, mut cw_digital) = (false, false);
    for class in classes {
        match class {
            ModeClass::Phone => phone = true,
            ModeClass::CwDigital => cw_digital = true,
        }
    }

    match (phone, cw_digital) {
        (false, true) => ModeCategory::CwDigitalOnly,
        (true, false) => ModeCategory::PhoneOnly,
        _ => ModeCategory::Mixed,
    }
}

/// Category of a log from its header and its contacts as logged.
pub fn derive_category(
    header: &StationHeader,
    contacts: &[ContactRecord],
    rules: &RuleSet,
    refs: &ReferenceData,
) -> CategoryAssignment {
    CategoryAssignment {
        location: derive_location_class(header, contacts, rules, refs),
        mode: derive_mode_category(contacts.iter().filter_map(|c| rules.mode_class(c.mode))),
        power: header.power,
        overlay: header.overlay,
    }
}
