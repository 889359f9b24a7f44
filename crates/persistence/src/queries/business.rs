// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business and business profile queries.

use bizreg_domain::{
    Address, AddressType, Business, BusinessProfile, Office, Party, PartyRole, ShareClass,
    ShareSeries,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

use crate::data_models::{
    AddressRow, BusinessRow, OfficeRow, PartyRoleRow, PartyRow, ShareClassRow, ShareSeriesRow,
};
use crate::diesel_schema::{
    addresses, businesses, offices, parties, party_roles, share_classes, share_series,
};
use crate::error::PersistenceError;

/// The loose records a business profile is assembled from.
///
/// Roles may carry a stale embedded party; the party in `parties` with the
/// same ID replaces it.
#[derive(Debug, Default)]
pub struct ProfileParts {
    pub offices: Vec<Office>,
    pub addresses: Vec<Address>,
    pub party_roles: Vec<PartyRole>,
    pub parties: Vec<Party>,
    pub share_classes: Vec<ShareClass>,
    pub share_series: Vec<ShareSeries>,
}

/// Joins loose records into a profile for `business`.
#[must_use]
pub fn assemble_profile(business: Business, parts: ProfileParts) -> BusinessProfile {
    let mut profile: BusinessProfile = BusinessProfile::new(business);

    let mut parties_by_id: BTreeMap<i64, Party> = BTreeMap::new();
    for mut party in parts.parties {
        let Some(party_id) = party.id else {
            continue;
        };
        for address in parts.addresses.iter().filter(|a| a.party_id == Some(party_id)) {
            match address.address_type {
                AddressType::Mailing => party.mailing_address = Some(address.clone()),
                AddressType::Delivery => party.delivery_address = Some(address.clone()),
                AddressType::Furnishing => {}
            }
        }
        parties_by_id.insert(party_id, party);
    }

    for mut office in parts.offices {
        office.addresses = parts
            .addresses
            .iter()
            .filter(|a| a.office_id.is_some() && a.office_id == office.id)
            .cloned()
            .collect();
        profile.offices.push(office);
    }

    for mut role in parts.party_roles {
        if let Some(party) = role.party.id.and_then(|id| parties_by_id.get(&id)) {
            role.party = party.clone();
        }
        profile.party_roles.push(role);
    }

    for mut class in parts.share_classes {
        class.series = parts
            .share_series
            .iter()
            .filter(|s| s.share_class_id.is_some() && s.share_class_id == class.id)
            .cloned()
            .collect();
        class.series.sort_by_key(|s| (s.priority, s.id));
        profile.share_classes.push(class);
    }

    profile
}

/// Looks up a business by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if no business has the identifier.
pub fn find_business_by_identifier(
    conn: &mut SqliteConnection,
    identifier: &str,
) -> Result<Option<Business>, PersistenceError> {
    debug!(identifier, "Looking up business by identifier");

    businesses::table
        .filter(businesses::identifier.eq(identifier))
        .select(BusinessRow::as_select())
        .first(conn)
        .optional()?
        .map(BusinessRow::into_domain)
        .transpose()
}

/// Loads a business by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the business does not exist.
pub fn get_business(conn: &mut SqliteConnection, business_id: i64) -> Result<Business, PersistenceError> {
    businesses::table
        .find(business_id)
        .select(BusinessRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Business {business_id} not found")))?
        .into_domain()
}

/// Loads the current profile of a business.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the business does not exist, or
/// an error if any query fails.
pub fn load_current_profile(
    conn: &mut SqliteConnection,
    business_id: i64,
) -> Result<BusinessProfile, PersistenceError> {
    let business: Business = get_business(conn, business_id)?;

    let offices: Vec<Office> = offices::table
        .filter(offices::business_id.eq(business_id))
        .order(offices::id.asc())
        .select(OfficeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(OfficeRow::into_domain)
        .collect::<Result<_, _>>()?;
    let office_ids: Vec<i64> = offices.iter().filter_map(|o| o.id).collect();

    let role_rows: Vec<PartyRoleRow> = party_roles::table
        .filter(party_roles::business_id.eq(business_id))
        .order(party_roles::id.asc())
        .select(PartyRoleRow::as_select())
        .load(conn)?;
    let party_ids: Vec<i64> = role_rows.iter().map(|r| r.party_id).collect();

    let parties: Vec<Party> = parties::table
        .filter(parties::id.eq_any(party_ids.clone()))
        .select(PartyRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PartyRow::into_domain)
        .collect::<Result<_, _>>()?;
    let parties_by_id: BTreeMap<i64, Party> = parties
        .iter()
        .filter_map(|p| p.id.map(|id| (id, p.clone())))
        .collect();

    let party_roles: Vec<PartyRole> = role_rows
        .into_iter()
        .map(|row| {
            let party: Party = parties_by_id.get(&row.party_id).cloned().ok_or_else(|| {
                PersistenceError::NotFound(format!("Party {} not found", row.party_id))
            })?;
            row.into_domain(party)
        })
        .collect::<Result<_, _>>()?;

    let addresses: Vec<Address> = addresses::table
        .filter(
            addresses::office_id
                .eq_any(office_ids)
                .or(addresses::party_id.eq_any(party_ids)),
        )
        .order(addresses::id.asc())
        .select(AddressRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AddressRow::into_domain)
        .collect::<Result<_, _>>()?;

    let share_classes: Vec<ShareClass> = share_classes::table
        .filter(share_classes::business_id.eq(business_id))
        .order(share_classes::id.asc())
        .select(ShareClassRow::as_select())
        .load(conn)?
        .into_iter()
        .map(ShareClassRow::into_domain)
        .collect();
    let class_ids: Vec<i64> = share_classes.iter().filter_map(|c| c.id).collect();

    let share_series: Vec<ShareSeries> = share_series::table
        .filter(share_series::share_class_id.eq_any(class_ids))
        .order(share_series::id.asc())
        .select(ShareSeriesRow::as_select())
        .load(conn)?
        .into_iter()
        .map(ShareSeriesRow::into_domain)
        .collect();

    Ok(assemble_profile(
        business,
        ProfileParts {
            offices,
            addresses,
            party_roles,
            parties,
            share_classes,
            share_series,
        },
    ))
}

/// Loads a party role with its party. Party addresses are not attached.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the role or its party does not exist.
pub fn get_party_role(conn: &mut SqliteConnection, role_id: i64) -> Result<PartyRole, PersistenceError> {
    let row: PartyRoleRow = party_roles::table
        .find(role_id)
        .select(PartyRoleRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Party role {role_id} not found")))?;

    let party: Party = parties::table
        .find(row.party_id)
        .select(PartyRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Party {} not found", row.party_id)))?
        .into_domain()?;

    row.into_domain(party)
}

/// Loads an address by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the address does not exist.
pub fn get_address(conn: &mut SqliteConnection, address_id: i64) -> Result<Address, PersistenceError> {
    addresses::table
        .find(address_id)
        .select(AddressRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Address {address_id} not found")))?
        .into_domain()
}
