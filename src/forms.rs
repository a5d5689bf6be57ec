use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore};

/// A form whose submissions are appended to a list under [`Submission::KEY`].
pub trait Submission: Serialize + DeserializeOwned {
    const KEY: &'static str;

    /// Same record with surrounding whitespace removed from every field.
    fn trimmed(self) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "celular")]
    pub phone: String,
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl Submission for ContactMessage {
    const KEY: &'static str = "contactanos";

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Sign-up form entry. The password is stored exactly as entered (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

impl Submission for Registration {
    const KEY: &'static str = "registrate";

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

/// A stored submission with the time it was received. Entries written
/// without a timestamp are still readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Local>>,
}

impl<T> Entry<T> {
    pub fn submitted_label(&self) -> String {
        self.submitted_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// Trims `record` and appends it to the persisted list for its form.
pub fn submit<T, S>(store: &mut S, record: T) -> storage::Result<Entry<T>>
where
    T: Submission + Clone,
    S: KeyValueStore + ?Sized,
{
    let entry = Entry {
        record: record.trimmed(),
        submitted_at: Some(Local::now()),
    };

    let mut entries: Vec<Entry<T>> = list(&*store)?;
    entries.push(entry.clone());
    storage::write_json(store, T::KEY, &entries)?;

    tracing::info!(form = T::KEY, count = entries.len(), "saved submission");
    Ok(entry)
}

/// Every stored submission for `T`, oldest first.
pub fn list<T, S>(store: &S) -> storage::Result<Vec<Entry<T>>>
where
    T: Submission,
    S: KeyValueStore + ?Sized,
{
    Ok(storage::read_json(store, T::KEY)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn contact(name: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: "  ana@example.com ".to_string(),
            phone: "3001234567".to_string(),
            message: "\thello\n".to_string(),
        }
    }

    #[test]
    fn test_submit_trims_fields() {
        let mut store = MemoryStore::new();
        let entry = submit(&mut store, contact("  Ana ")).unwrap();
        assert_eq!(entry.record.name, "Ana");
        assert_eq!(entry.record.email, "ana@example.com");
        assert_eq!(entry.record.message, "hello");
    }

    #[test]
    fn test_submissions_append_in_order() {
        let mut store = MemoryStore::new();
        submit(&mut store, contact("first")).unwrap();
        submit(&mut store, contact("second")).unwrap();

        let stored: Vec<Entry<ContactMessage>> = list(&store).unwrap();
        let names: Vec<&str> = stored.iter().map(|e| e.record.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_forms_use_separate_keys() {
        let mut store = MemoryStore::new();
        submit(&mut store, contact("Ana")).unwrap();
        submit(
            &mut store,
            Registration {
                name: "Luis".into(),
                email: "luis@example.com".into(),
                password: " secret ".into(),
            },
        )
        .unwrap();

        assert!(store.get("contactanos").unwrap().is_some());
        let regs: Vec<Entry<Registration>> = list(&store).unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].record.password, "secret");
        let contacts: Vec<Entry<ContactMessage>> = list(&store).unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_stored_shape_is_flat() {
        let mut store = MemoryStore::new();
        submit(&mut store, contact("Ana")).unwrap();
        let raw = store.get("contactanos").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["nombre"], "Ana");
        assert_eq!(json[0]["correo"], "ana@example.com");
        assert_eq!(json[0]["celular"], "3001234567");
        assert_eq!(json[0]["mensaje"], "hello");
        assert!(json[0]["submitted_at"].is_string());
    }

    #[test]
    fn test_reads_entries_without_timestamp() {
        let mut store = MemoryStore::new();
        store
            .set(
                "registrate",
                r#"[{"name":"Luis","correo":"luis@example.com","contraseña":"x"}]"#,
            )
            .unwrap();
        store
            .set(
                "contactanos",
                r#"[{"nombre":"Ana","correo":"a@b.co","celular":"1","mensaje":"hola"}]"#,
            )
            .unwrap();

        let regs: Vec<Entry<Registration>> = list(&store).unwrap();
        assert_eq!(regs[0].record.email, "luis@example.com");
        assert_eq!(regs[0].record.password, "x");
        assert_eq!(regs[0].submitted_at, None);
        assert_eq!(regs[0].submitted_label(), "-");

        let contacts: Vec<Entry<ContactMessage>> = list(&store).unwrap();
        assert_eq!(contacts[0].record.message, "hola");

        // appending keeps the older entry
        submit(
            &mut store,
            Registration {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "y".into(),
            },
        )
        .unwrap();
        let regs: Vec<Entry<Registration>> = list(&store).unwrap();
        assert_eq!(regs.len(), 2);
        assert!(regs[1].submitted_at.is_some());
    }

    #[test]
    fn test_empty_list_when_nothing_stored() {
        let store = MemoryStore::new();
        let stored: Vec<Entry<Registration>> = list(&store).unwrap();
        assert!(stored.is_empty());
    }
}
