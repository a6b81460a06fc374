mod report_writer_test;
