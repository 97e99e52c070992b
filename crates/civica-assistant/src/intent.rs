//! Intent categories and their canned replies

/// Response category selected by the intent router
///
/// Each intent maps to exactly one reply, so the assistant's output is
/// fully determined by the routed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// User asks how to file a complaint
    SubmitComplaint,
    /// User asks about the state of an existing complaint
    TrackStatus,
    /// User asks about account registration
    Register,
    /// User asks about signing in
    Login,
    /// User asks about one-time-password verification
    OtpVerification,
    /// User asks how priorities are assigned
    PriorityInfo,
    /// User sent an attachment with no recognizable question
    AttachmentAck,
    /// Generic fallback for the user role
    GeneralHelp,
    /// Admin asks about analytics or reports
    Analytics,
    /// Admin asks how to add a user
    AddUser,
    /// Generic fallback for the admin role
    AdminHelp,
    /// Authority asks about assigned complaints
    AssignedComplaints,
    /// Generic fallback for the authority role
    AuthorityHelp,
}

impl Intent {
    /// The canned assistant reply for this intent
    pub fn reply(&self) -> &'static str {
        match self {
            Intent::SubmitComplaint => {
                "To submit a new complaint, go to the dashboard and click on 'New Complaint'. \
                 Fill in the details including title, category, location, and description. \
                 You can also attach images if needed."
            }
            Intent::TrackStatus => {
                "You can track the status of your complaints in the 'Track Status' section. \
                 Enter your complaint ID or browse through your complaints to see their \
                 current status and updates."
            }
            Intent::Register => {
                "To register, click the Register button on the welcome page. You'll need to \
                 provide your username, phone number for OTP verification, and create a password."
            }
            Intent::Login => {
                "You can login using your username and password or phone number with OTP \
                 verification. If you've forgotten your password, use the 'Forgot Password' \
                 link on the login page."
            }
            Intent::OtpVerification => {
                "OTP verification is used during registration and phone number login. Enter \
                 your phone number, and we'll send you a 6-digit OTP to verify your identity."
            }
            Intent::PriorityInfo => {
                "Priority is assigned automatically from the nature, category, and description \
                 of a complaint. High priority complaints are addressed more quickly."
            }
            Intent::AttachmentAck => {
                "Thank you for sharing the attachment. This will help in better understanding \
                 and resolving your issue. Is there anything specific about this attachment \
                 you'd like to highlight?"
            }
            Intent::GeneralHelp => {
                "I'm here to help with any questions about the Civica platform. You can ask \
                 about submitting complaints, tracking status, account management, or any \
                 other features."
            }
            Intent::Analytics => {
                "You can access detailed analytics in the Analytics tab of the admin \
                 dashboard. Would you like me to show you how to generate specific reports?"
            }
            Intent::AddUser => {
                "To add a new user, go to the Users tab in the admin dashboard and click on \
                 'Add New User'. You'll need to provide their name, email, phone number, and role."
            }
            Intent::AdminHelp => {
                "As an admin, you have access to all system features. You can manage \
                 complaints, users, authorities, and view analytics. What specific \
                 administrative task would you like help with?"
            }
            Intent::AssignedComplaints => {
                "You can view all complaints assigned to you in your authority dashboard. \
                 To update the status of a complaint, click on 'Update Status' next to the \
                 complaint."
            }
            Intent::AuthorityHelp => {
                "As an authority, you're responsible for resolving assigned complaints. You \
                 can update the status of complaints, add notes, and communicate with users. \
                 How can I assist you with your authority tasks?"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_has_a_reply() {
        let intents = [
            Intent::SubmitComplaint,
            Intent::TrackStatus,
            Intent::Register,
            Intent::Login,
            Intent::OtpVerification,
            Intent::PriorityInfo,
            Intent::AttachmentAck,
            Intent::GeneralHelp,
            Intent::Analytics,
            Intent::AddUser,
            Intent::AdminHelp,
            Intent::AssignedComplaints,
            Intent::AuthorityHelp,
        ];
        for intent in intents {
            assert!(!intent.reply().is_empty());
        }
    }
}
