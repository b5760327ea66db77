//! Renders the applicant record into the agent's instruction document.

use crate::applicant::ApplicantRecord;

pub const LOGIN_URL: &str = "https://apply.commonapp.org/login";

const SECTIONS: &str = "Questions, Writing, Family, Education, Testing, Activities, etc.";

/// Build the full multi-stage task for the agent.
pub fn build_task(record: &ApplicantRecord) -> String {
    let mut task = String::new();
    task.push_str(
        "Your goal is to complete the ENTIRE Common Application process for the user. \
         This is a multi-stage task:\n\n",
    );
    task.push_str(&format!("**USER CONTEXT:**\n{}\n\n", record.full_context.trim_end()));
    task.push_str(&profile_section(record));
    task.push_str(&login_stage(record));
    task.push_str(&add_colleges_stage(&record.colleges));
    task.push_str(&fill_forms_stage(&record.colleges));
    task.push_str(GENERAL_INSTRUCTIONS);
    task.push_str(COMPLETION);
    task
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn profile_section(r: &ApplicantRecord) -> String {
    let rows: Vec<(&str, String)> = vec![
        ("Name", r.full_name()),
        ("Age", r.age.to_string()),
        ("Application term", r.application_term.clone()),
        ("Citizenship status", r.citizenship_status.to_string()),
        ("Has green card", yes_no(r.has_green_card).into()),
        ("Birth country", r.birth_country.clone()),
        ("Birth state", r.birth_state.clone()),
        ("Lived outside the US", yes_no(r.lived_outside_us).into()),
        ("First-generation student", yes_no(r.first_generation).into()),
        ("Interested in honors college", yes_no(r.honors_college).into()),
        ("Criminal history", yes_no(r.criminal_history).into()),
        (
            "Academic disciplinary history",
            yes_no(r.academic_disciplinary_history).into(),
        ),
        (
            "Legal disciplinary history",
            yes_no(r.legal_disciplinary_history).into(),
        ),
        ("Military service", yes_no(r.military_service).into()),
        ("Relatives in the military", yes_no(r.military_relatives).into()),
        ("Submitting an arts portfolio", yes_no(r.arts_portfolio).into()),
        ("Parents attended Stanford", yes_no(r.parents_attended_stanford).into()),
        ("Parents employed by Stanford", yes_no(r.parents_employed_stanford).into()),
        (
            "Relatives employed by Stanford",
            yes_no(r.relatives_employed_stanford).into(),
        ),
        (
            "Parents live at separate addresses",
            yes_no(r.parents_separate_address).into(),
        ),
        ("Number of siblings", r.siblings.to_string()),
        (
            "Siblings applying to college",
            yes_no(r.siblings_applying_to_college).into(),
        ),
    ];

    let mut out = String::from("**APPLICANT PROFILE:**\n");
    for (label, value) in rows {
        if !value.trim().is_empty() {
            out.push_str(&format!("- {label}: {value}\n"));
        }
    }
    out.push('\n');
    out
}

fn login_stage(r: &ApplicantRecord) -> String {
    format!(
        "**STAGE 1: LOGIN**\n\
         1. Navigate to {LOGIN_URL}\n\
         2. Log in using:\n   \
         - Email: {}\n   \
         - Password: {}\n\
         3. Close any welcome popups or tours that appear after login\n\n",
        r.credentials.email, r.credentials.password
    )
}

fn add_colleges_stage(colleges: &[String]) -> String {
    let mut out = String::from(
        "**STAGE 2: ADD COLLEGES**\n\
         CRITICAL: DO NOT click any \"Remove\" or \"Cancel\" buttons during this stage. \
         Only click \"Add School\" buttons.\n\n\
         1. Navigate to the \"College Search\" or \"Search\" tab/section\n\n",
    );

    for (i, college) in colleges.iter().enumerate() {
        let mut steps: Vec<String> = Vec::new();
        if i == 0 {
            steps.push("Click on the search bar/input field".into());
            steps.push(format!("Type \"{college}\" into the search bar"));
        } else {
            steps.push(format!(
                "With the search bar now cleared, type \"{college}\" into the search bar"
            ));
        }
        steps.push("Wait for search results to appear".into());
        steps.push(format!("Find {college} in the results"));
        steps.push(format!("Click the \"Add School\" button for {college}"));
        steps.push(format!("Wait for confirmation that {college} was added"));
        if i + 1 < colleges.len() {
            steps.push(format!(
                "Click back into the search bar and DELETE \"{college}\" from the search bar \
                 (clear it completely)"
            ));
        }

        out.push_str(&format!("{}. ADD {}:\n", i + 2, college.to_uppercase()));
        out.push_str(&lettered(&steps));
        out.push('\n');
    }

    out.push_str(&format!(
        "{}. Navigate to \"My Colleges\" tab\n\n\
         IMPORTANT: If you see a \"Remove\" button, IGNORE IT. \
         Never click Remove or Cancel buttons.\n\n",
        colleges.len() + 2
    ));
    out
}

fn fill_forms_stage(colleges: &[String]) -> String {
    let mut out = String::from(
        "**STAGE 3: FILL OUT COLLEGE-SPECIFIC FORMS**\n\n\
         YOU MUST COMPLETE ONE COLLEGE ENTIRELY BEFORE MOVING TO THE NEXT.\n\n",
    );
    out.push_str(&format!(
        "1. In the \"My Colleges\" tab, you should see {}\n\n",
        join_names(colleges)
    ));

    for (i, college) in colleges.iter().enumerate() {
        let heading = if i == 0 {
            format!("COMPLETE {} FIRST", college.to_uppercase())
        } else {
            format!("THEN COMPLETE {}", college.to_uppercase())
        };
        let mut steps = vec![
            format!("Click on \"{college}\" to open its application"),
            format!("Go through EVERY available tab/section/category ({SECTIONS})"),
            "For EACH section, fill in ALL questions you can answer based on USER CONTEXT".into(),
            "If you cannot answer a question from the context, SKIP it and move to the next question"
                .into(),
            "Save progress after completing each section/category".into(),
        ];
        match colleges.get(i + 1) {
            Some(next) => {
                steps.push(format!(
                    "Do NOT move to {next} until you have gone through ALL sections for {college}"
                ));
                steps.push(format!(
                    "After completing ALL {college} sections, return to \"My Colleges\""
                ));
            }
            None => steps.push(format!(
                "After completing ALL {college} sections, you are done"
            )),
        }

        out.push_str(&format!("{}. {}:\n", i + 2, heading));
        out.push_str(&lettered(&steps));
        out.push('\n');
    }
    out
}

/// Indented `a.`, `b.`, ... list.
fn lettered(steps: &[String]) -> String {
    steps
        .iter()
        .zip('a'..='z')
        .map(|(step, letter)| format!("   {letter}. {step}\n"))
        .collect()
}

fn join_names(colleges: &[String]) -> String {
    match colleges {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

const GENERAL_INSTRUCTIONS: &str = "**IMPORTANT INSTRUCTIONS:**
- Work methodically through each stage - do not skip stages
- NEVER click \"Remove\" or \"Cancel\" buttons when adding colleges
- Once a college is added, immediately move on to the next college search
- Read each question carefully before answering
- Use ONLY information from the USER CONTEXT provided above
- If a question is unclear or you don't have the information, SKIP it - do not guess
- If you encounter dropdowns, select the option that best matches the context
- For yes/no questions, use the context to determine the correct answer
- Save your work frequently after completing each section
- If you encounter errors or popups, handle them gracefully and continue
- Do not submit any applications - only fill out the forms
- Focus on one field at a time, scrolling to make it visible before interacting
- In \"My Colleges\" section, work on one college at a time completely before moving to the next

";

const COMPLETION: &str = "**COMPLETION:**
- You are done when you have gone through ALL colleges and filled out ALL available sections for each
- Use the done action when complete
- Provide a detailed summary of:
  1. Which colleges were added successfully
  2. Which sections were completed for each college
  3. Any questions that were skipped and why
  4. Any errors or issues encountered
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::{normalize, ApplicantFields};

    fn record(colleges: &[&str]) -> ApplicantRecord {
        let fields = ApplicantFields {
            email: Some("a@b.com".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Park".into()),
            colleges: Some(colleges.iter().map(|c| c.to_string()).collect()),
            ..ApplicantFields::default()
        };
        normalize(fields, Some("pw1".into()), "Plays chess.".into())
    }

    #[test]
    fn task_carries_context_and_credentials() {
        let task = build_task(&record(&["MIT"]));
        assert!(task.contains("**USER CONTEXT:**\nPlays chess."));
        assert!(task.contains(LOGIN_URL));
        assert!(task.contains("- Email: a@b.com"));
        assert!(task.contains("- Password: pw1"));
        assert!(task.contains("- Name: Ada Park"));
        assert!(task.contains("- Citizenship status: International"));
    }

    #[test]
    fn stages_appear_in_order() {
        let task = build_task(&record(&["MIT"]));
        let login = task.find("STAGE 1: LOGIN").unwrap();
        let add = task.find("STAGE 2: ADD COLLEGES").unwrap();
        let fill = task.find("STAGE 3: FILL OUT").unwrap();
        let done = task.find("**COMPLETION:**").unwrap();
        assert!(login < add && add < fill && fill < done);
    }

    #[test]
    fn every_college_gets_its_own_steps_in_order() {
        let task = build_task(&record(&["Yale", "Duke", "Rice"]));
        let yale = task.find("2. ADD YALE:").unwrap();
        let duke = task.find("3. ADD DUKE:").unwrap();
        let rice = task.find("4. ADD RICE:").unwrap();
        assert!(yale < duke && duke < rice);
        assert!(task.contains("5. Navigate to \"My Colleges\" tab"));
        assert!(task.contains("you should see Yale, Duke and Rice"));
        assert!(task.contains("2. COMPLETE YALE FIRST:"));
        assert!(task.contains("3. THEN COMPLETE DUKE:"));
        assert!(task.contains("Do NOT move to Duke until you have gone through ALL sections for Yale"));
        assert!(task.contains("After completing ALL Rice sections, you are done"));
    }

    #[test]
    fn last_college_is_not_cleared_from_search() {
        let task = build_task(&record(&["Yale", "Duke"]));
        assert!(task.contains("DELETE \"Yale\""));
        assert!(!task.contains("DELETE \"Duke\""));
    }

    #[test]
    fn task_forbids_destructive_buttons_and_guessing() {
        let task = build_task(&record(&["MIT"]));
        assert!(task.contains("DO NOT click any \"Remove\" or \"Cancel\" buttons"));
        assert!(task.contains("SKIP it - do not guess"));
        assert!(task.contains("Do not submit any applications"));
        assert!(task.contains("Any questions that were skipped and why"));
    }

    #[test]
    fn blank_profile_values_are_left_out() {
        let task = build_task(&record(&["MIT"]));
        assert!(!task.contains("- Birth state:"));
        assert!(task.contains("- Birth country: United States"));
    }
}
