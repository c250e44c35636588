use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use leadline_core::domain::{
    FollowupPriority, Lead, LeadId, PaybackTime, PaymentFrequency, Position, PositionId, Stage,
};
use leadline_core::followup::CivilTimestamp;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::str::FromStr;

const LEAD_COLUMNS: &str = "id, business_name, owner_name, phone, email, business_type,
     business_type_details, credit_score, funding_amount, monthly_revenue, funding_purpose,
     payback_time, has_mca_history, has_defaults, default_details, stage, next_followup,
     followup_priority, followup_notes, internal_notes, client_timezone, client_city,
     client_state, created_at, updated_at";

pub struct LeadsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LeadsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a fully formed lead and its positions.
    pub fn create(&self, lead: &Lead) -> Result<Lead> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let created = create_inner(&tx, lead)?;
            tx.commit()?;
            Ok(created)
        } else {
            create_inner(self.conn, lead)
        }
    }

    pub fn get(&self, id: LeadId) -> Result<Option<Lead>> {
        get_inner(self.conn, id)
    }

    /// Oldest first, so reloading yields the same order as appending.
    pub fn list_all(&self) -> Result<Vec<Lead>> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut leads = Vec::new();
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }
        attach_positions(self.conn, &mut leads)?;
        Ok(leads)
    }

    /// Rewrites every column and replaces the position list.
    pub fn update(&self, lead: &Lead) -> Result<Lead> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let updated = update_inner(&tx, lead)?;
            tx.commit()?;
            Ok(updated)
        } else {
            update_inner(self.conn, lead)
        }
    }

    /// Positions go with the lead through `ON DELETE CASCADE`.
    pub fn delete(&self, id: LeadId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM leads WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Case-insensitive substring match on names, email, phone and business
    /// type. Business-name prefix matches rank first.
    pub fn search(&self, term: &str) -> Result<Vec<Lead>> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return self.list_all();
        }
        let pattern = format!("%{}%", escape_like(trimmed));
        let prefix = format!("{}%", escape_like(trimmed));
        let sql = format!(
            "SELECT {LEAD_COLUMNS} FROM leads
             WHERE business_name LIKE ?1 ESCAPE '\\'
                OR owner_name LIKE ?1 ESCAPE '\\'
                OR IFNULL(email, '') LIKE ?1 ESCAPE '\\'
                OR phone LIKE ?1 ESCAPE '\\'
                OR IFNULL(business_type, '') LIKE ?1 ESCAPE '\\'
             ORDER BY CASE WHEN business_name LIKE ?2 ESCAPE '\\' THEN 0 ELSE 1 END,
                      business_name COLLATE NOCASE ASC,
                      created_at ASC;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![pattern, prefix])?;
        let mut leads = Vec::new();
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }
        attach_positions(self.conn, &mut leads)?;
        Ok(leads)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM leads;", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_positions(&self, id: LeadId) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM positions WHERE lead_id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn create_inner(conn: &Connection, lead: &Lead) -> Result<Lead> {
    lead.validate()?;
    if exists(conn, lead.id)? {
        return Err(StoreError::DuplicateId(lead.id.to_string()));
    }

    conn.execute(
        "INSERT INTO leads (id, business_name, owner_name, phone, email, business_type,
             business_type_details, credit_score, funding_amount, monthly_revenue,
             funding_purpose, payback_time, has_mca_history, has_defaults, default_details,
             stage, next_followup, followup_priority, followup_notes, internal_notes,
             client_timezone, client_city, client_state, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25);",
        params![
            lead.id.to_string(),
            lead.business_name,
            lead.owner_name,
            lead.phone,
            lead.email,
            lead.business_type,
            lead.business_type_details,
            lead.credit_score,
            lead.funding_amount,
            lead.monthly_revenue,
            lead.funding_purpose,
            lead.payback_time.map(|p| p.as_str()),
            lead.has_mca_history,
            lead.has_defaults,
            lead.default_details,
            lead.stage.label(),
            lead.next_followup.map(|at| at.to_wire()),
            lead.followup_priority.as_str(),
            lead.followup_notes,
            lead.internal_notes,
            lead.client_timezone,
            lead.client_city,
            lead.client_state,
            lead.created_at.timestamp_micros(),
            lead.updated_at.timestamp_micros(),
        ],
    )?;
    insert_positions(conn, lead)?;

    get_inner(conn, lead.id)?.ok_or_else(|| StoreError::NotFound(lead.id.to_string()))
}

fn update_inner(conn: &Connection, lead: &Lead) -> Result<Lead> {
    lead.validate()?;

    let updated = conn.execute(
        "UPDATE leads
         SET business_name = ?2,
             owner_name = ?3,
             phone = ?4,
             email = ?5,
             business_type = ?6,
             business_type_details = ?7,
             credit_score = ?8,
             funding_amount = ?9,
             monthly_revenue = ?10,
             funding_purpose = ?11,
             payback_time = ?12,
             has_mca_history = ?13,
             has_defaults = ?14,
             default_details = ?15,
             stage = ?16,
             next_followup = ?17,
             followup_priority = ?18,
             followup_notes = ?19,
             internal_notes = ?20,
             client_timezone = ?21,
             client_city = ?22,
             client_state = ?23,
             updated_at = ?24
         WHERE id = ?1;",
        params![
            lead.id.to_string(),
            lead.business_name,
            lead.owner_name,
            lead.phone,
            lead.email,
            lead.business_type,
            lead.business_type_details,
            lead.credit_score,
            lead.funding_amount,
            lead.monthly_revenue,
            lead.funding_purpose,
            lead.payback_time.map(|p| p.as_str()),
            lead.has_mca_history,
            lead.has_defaults,
            lead.default_details,
            lead.stage.label(),
            lead.next_followup.map(|at| at.to_wire()),
            lead.followup_priority.as_str(),
            lead.followup_notes,
            lead.internal_notes,
            lead.client_timezone,
            lead.client_city,
            lead.client_state,
            lead.updated_at.timestamp_micros(),
        ],
    )?;
    if updated == 0 {
        return Err(StoreError::NotFound(lead.id.to_string()));
    }

    conn.execute(
        "DELETE FROM positions WHERE lead_id = ?1;",
        [lead.id.to_string()],
    )?;
    insert_positions(conn, lead)?;

    get_inner(conn, lead.id)?.ok_or_else(|| StoreError::NotFound(lead.id.to_string()))
}

fn insert_positions(conn: &Connection, lead: &Lead) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO positions (id, lead_id, position_index, lender_name, original_amount,
             current_balance, payment_frequency, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
    )?;
    let stamp = lead.updated_at.timestamp_micros();
    for (index, position) in lead.current_positions.iter().enumerate() {
        stmt.execute(params![
            position.id.to_string(),
            lead.id.to_string(),
            index as i64,
            position.lender_name,
            position.original_amount,
            position.current_balance,
            position.payment_frequency.as_str(),
            stamp,
            stamp,
        ])?;
    }
    Ok(())
}

fn exists(conn: &Connection, id: LeadId) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM leads WHERE id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn get_inner(conn: &Connection, id: LeadId) -> Result<Option<Lead>> {
    let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1;");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id.to_string()])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };
    let mut lead = lead_from_row(row)?;
    lead.current_positions = positions_for(conn, lead.id)?;
    Ok(Some(lead))
}

fn positions_for(conn: &Connection, id: LeadId) -> Result<Vec<Position>> {
    let mut stmt = conn.prepare(
        "SELECT id, lender_name, original_amount, current_balance, payment_frequency
         FROM positions WHERE lead_id = ?1 ORDER BY position_index ASC;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut positions = Vec::new();
    while let Some(row) = rows.next()? {
        positions.push(position_from_row(row, 0)?);
    }
    Ok(positions)
}

fn attach_positions(conn: &Connection, leads: &mut [Lead]) -> Result<()> {
    if leads.is_empty() {
        return Ok(());
    }
    let mut stmt = conn.prepare(
        "SELECT lead_id, id, lender_name, original_amount, current_balance, payment_frequency
         FROM positions ORDER BY lead_id, position_index ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut by_lead: HashMap<String, Vec<Position>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let lead_id: String = row.get(0)?;
        by_lead
            .entry(lead_id)
            .or_default()
            .push(position_from_row(row, 1)?);
    }
    for lead in leads.iter_mut() {
        if let Some(positions) = by_lead.remove(&lead.id.to_string()) {
            lead.current_positions = positions;
        }
    }
    Ok(())
}

fn position_from_row(row: &Row<'_>, offset: usize) -> Result<Position> {
    let id_str: String = row.get(offset)?;
    let id = PositionId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let frequency: String = row.get(offset + 4)?;
    Ok(Position {
        id,
        lender_name: row.get(offset + 1)?,
        original_amount: row.get(offset + 2)?,
        current_balance: row.get(offset + 3)?,
        payment_frequency: PaymentFrequency::from_str(&frequency)?,
    })
}

fn lead_from_row(row: &Row<'_>) -> Result<Lead> {
    let id_str: String = row.get(0)?;
    let id = LeadId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let payback: Option<String> = row.get(11)?;
    let stage: String = row.get(15)?;
    let next_followup: Option<String> = row.get(16)?;
    let priority: String = row.get(17)?;

    Ok(Lead {
        id,
        business_name: row.get(1)?,
        owner_name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        business_type: row.get(5)?,
        business_type_details: row.get(6)?,
        credit_score: row.get(7)?,
        funding_amount: row.get(8)?,
        monthly_revenue: row.get(9)?,
        funding_purpose: row.get(10)?,
        payback_time: payback.as_deref().map(PaybackTime::from_str).transpose()?,
        current_positions: Vec::new(),
        has_mca_history: row.get(12)?,
        has_defaults: row.get(13)?,
        default_details: row.get(14)?,
        stage: Stage::from_str(&stage)?,
        next_followup: next_followup
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(CivilTimestamp::parse_wire)
            .transpose()?,
        followup_priority: FollowupPriority::from_str(&priority)?,
        followup_notes: row.get(18)?,
        internal_notes: row.get(19)?,
        client_timezone: row.get(20)?,
        client_city: row.get(21)?,
        client_state: row.get(22)?,
        created_at: micros_to_utc(row.get(23)?)?,
        updated_at: micros_to_utc(row.get(24)?)?,
    })
}

fn micros_to_utc(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros).ok_or(StoreError::InvalidTimestamp(micros))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
