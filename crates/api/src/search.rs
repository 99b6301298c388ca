//! Client-side worker lookup by id or name.

use crate::types::MedicalWorker;

/// Find the worker a search box term refers to
///
/// An all-digit term is tried as a `worker_id` first. Otherwise, or when no
/// worker has that id, the term is matched case-insensitively as a substring
/// of the first name, the last name, or "first last". Blank terms match
/// nothing.
pub fn find_worker<'a>(workers: &'a [MedicalWorker], term: &str) -> Option<&'a MedicalWorker> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    if term.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(id) = term.parse::<i64>() {
            if let Some(worker) = workers.iter().find(|w| w.worker_id == id) {
                return Some(worker);
            }
        }
    }

    let needle = term.to_lowercase();
    workers.iter().find(|w| {
        w.first_name.to_lowercase().contains(&needle)
            || w.last_name.to_lowercase().contains(&needle)
            || w.full_name().to_lowercase().contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(id: i64, first: &str, last: &str) -> MedicalWorker {
        MedicalWorker {
            worker_id: id,
            first_name: first.into(),
            last_name: last.into(),
            email: String::new(),
            phone_number: String::new(),
            department_id: 1,
            department_name: String::new(),
            specialization_id: 1,
            specialization_name: String::new(),
            hire_date: "2020-01-01".into(),
            salary: 0.0,
            license_number: String::new(),
            has_image: false,
            row_version: None,
            experience: None,
        }
    }

    fn roster() -> Vec<MedicalWorker> {
        vec![
            worker(1, "Maria", "Ivanova"),
            worker(12, "Georgi", "Dimitrov"),
            worker(42, "Elena", "Marinova"),
        ]
    }

    #[test]
    fn test_id_match_wins() {
        let workers = roster();
        assert_eq!(find_worker(&workers, "12").unwrap().last_name, "Dimitrov");
        assert_eq!(find_worker(&workers, " 42 ").unwrap().worker_id, 42);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let workers = roster();
        assert_eq!(find_worker(&workers, "ELENA").unwrap().worker_id, 42);
        assert_eq!(find_worker(&workers, "georgi dim").unwrap().worker_id, 12);
        // First hit in list order
        assert_eq!(find_worker(&workers, "mar").unwrap().worker_id, 1);
    }

    #[test]
    fn test_no_match() {
        let workers = roster();
        assert!(find_worker(&workers, "").is_none());
        assert!(find_worker(&workers, "   ").is_none());
        assert!(find_worker(&workers, "999").is_none());
        assert!(find_worker(&workers, "Zhivkov").is_none());
    }
}
