//! Prompt templates for the two LLM calls
//!
//! One parameterized template pair covers both orchestration flavors: a
//! fresh project (no file context; the planner decides WHAT, not WHERE)
//! and a file-aware session (the planner sees the current file map and
//! names exact paths). File maps are serialized as `=== path ===` blocks
//! in both directions.

use vibeforge_project::FileMap;

/// Serialize a file map into the prompt block format
#[must_use]
pub fn serialize_file_map(files: &FileMap) -> String {
    files
        .iter()
        .map(|(path, content)| format!("=== {path} ===\n{content}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Planning prompt
///
/// With `files`, produces the file-aware flavor that analyzes the current
/// codebase and names exact paths; without, the fresh-project flavor that
/// forbids file paths entirely and pins down every vague design request.
#[must_use]
pub fn planning_prompt(project_name: &str, user_prompt: &str, files: Option<&FileMap>) -> String {
    match files {
        Some(files) => file_aware_planning_prompt(project_name, user_prompt, files),
        None => fresh_planning_prompt(project_name, user_prompt),
    }
}

fn file_aware_planning_prompt(project_name: &str, user_prompt: &str, files: &FileMap) -> String {
    let file_blocks = serialize_file_map(files);
    format!(
        "You are an expert software architect. Analyze the user's request and current \
codebase, then create EXACT, PRECISE implementation instructions.

PROJECT NAME: {project_name}

CURRENT FILES:
{file_blocks}

USER REQUEST: {user_prompt}

Generate EXACT implementation instructions in this EXACT format:

# EXACT IMPLEMENTATION INSTRUCTIONS

## CURRENT STATE ANALYSIS
- What currently exists in the codebase
- What needs to be changed
- What needs to be added

## FILE-BY-FILE MODIFICATIONS

### File: [exact_file_path]
**Action:** [MODIFY/CREATE/DELETE]
**Current State:** [Brief description of current content]
**Required Changes:** [EXACT step-by-step instructions]
**Expected Outcome:** [What the file should contain after changes]

## IMPLEMENTATION LOGIC
- Data flow changes needed
- State management requirements
- Component interactions

## DEPENDENCIES & IMPORTS
- What imports need to be added
- What existing code needs to be refactored

CRITICAL RULES:
1. DO NOT WRITE ACTUAL CODE - only instructions
2. BE EXTREMELY SPECIFIC about what to change
3. INCLUDE EXACT FILE PATHS
4. FOCUS ON MODIFICATION INSTRUCTIONS, not code generation
5. CONSIDER CURRENT CODE STRUCTURE

Return ONLY the instructions in this exact format, no other text."
    )
}

fn fresh_planning_prompt(project_name: &str, user_prompt: &str) -> String {
    format!(
        "You are an expert UX/UI designer and product architect. Your job is to understand \
the user's request and provide EXTREMELY SPECIFIC implementation instructions WITHOUT \
deciding which files to modify.

USER REQUEST: {user_prompt}
PROJECT NAME: {project_name}

Your job is to be PRECISE about WHAT needs to change, not WHERE:

# PRECISE IMPLEMENTATION INSTRUCTIONS

## WHAT THE USER WANTS
[Interpret the user's request clearly and specifically]

## SPECIFIC CHANGES REQUIRED

### Visual/UI Changes:
- BE SPECIFIC about colors (use hex codes), sizes (use px/rem), spacing (exact values)

### Functional Changes:
- Describe EXACTLY what each feature should do step by step

### Content Changes:
- Provide the EXACT text to use

CRITICAL RULES:
1. DO NOT mention file names or file paths
2. DO NOT write actual code
3. BE EXTREMELY SPECIFIC - no vague terms like \"nice\", \"good\", \"better\"
4. Replace ALL vague requests with precise specifications
5. If the user's request is vague, YOU make the specific design decisions for them

Return ONLY the precise instructions. Be the design decision maker."
    )
}

/// Execution prompt: approved instructions plus the full current file map,
/// with a strict JSON-only output contract
#[must_use]
pub fn execution_prompt(instructions: &str, files: &FileMap) -> String {
    let file_blocks = serialize_file_map(files);
    format!(
        "You are a precise code implementation AI. Follow these EXACT instructions to \
modify the codebase.

IMPLEMENTATION INSTRUCTIONS:
{instructions}

CURRENT CODEBASE STATE:
{file_blocks}

CRITICAL RULES FOR IMPLEMENTATION:
1. Follow the instructions EXACTLY as written
2. Only make changes specified in the instructions
3. Do NOT add any extra features or changes
4. Return COMPLETE file content for modified files
5. Preserve existing code that isn't mentioned in the instructions

Apply the instructions step by step and return ONLY valid JSON in this exact format:

{{
  \"updated_files\": {{
    \"exact_file_path_1\": \"complete new content following instructions exactly\",
    \"exact_file_path_2\": \"complete new content following instructions exactly\"
  }},
  \"execution_summary\": \"Brief description of changes made according to instructions\"
}}

Return ONLY the JSON, no other text or explanations."
    )
}
