pub mod job_spec;
