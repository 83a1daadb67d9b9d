mod av;
