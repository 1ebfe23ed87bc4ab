use crate::models::Department;

/// First department (in list order) whose name contains the input or is
/// contained in it, ignoring case.
pub fn resolve_department(text: &str) -> Option<Department> {
    let input = text.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    Department::ALL.into_iter().find(|dept| {
        let name = dept.name().to_lowercase();
        name.contains(&input) || input.contains(&name)
    })
}

pub fn department_list() -> String {
    Department::ALL
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ")
}
