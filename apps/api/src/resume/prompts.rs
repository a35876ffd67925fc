// Resume pipeline LLM prompt templates.
// All prompts for the resume module are defined here.

pub const SCORE_PROMPT: &str = "\
Evaluate the quality of the following resume. Provide a score from 1 to 10 \
and give 3-5 bullet points with strengths and weaknesses.

{resume_text}
";

pub const FEEDBACK_PROMPT: &str = "\
Read the following resume text and identify any areas that could be improved. \
Highlight sections that are vague, use weak or passive verbs, lack quantifiable \
impact, or could be rewritten to better showcase skills and accomplishments. \
Do not rewrite the full resume. Just list specific suggestions for improvements \
or mark weak areas with brief explanations.

Resume:
{resume_text}

Suggestions:
";

pub const SKILLS_PROMPT: &str = "\
From the following resume text, extract the top 5-10 technical and soft skills \
in a comma-separated list:

{resume_text}
";

pub const COVER_LETTER_TAILORED_PROMPT: &str = "\
Using the resume and job description below, generate a professional cover letter:

Resume:
{resume_text}

Job Description:
{job_description}

Top Skills: {skills}
";

pub const COVER_LETTER_GENERAL_PROMPT: &str = "\
Generate a general professional cover letter using the following resume:

Resume:
{resume_text}

Top Skills: {skills}
";

pub const SEARCH_TERMS_PROMPT: &str = "\
From the following resume text, extract 5-10 short job search terms that \
describe the candidate's skills and target roles.

Respond with the heading 'Search Terms:' followed by one term per line, each \
line formatted exactly as '- <term>'. Do not add any other text.

{resume_text}
";
